pub use super::booking::Entity as Booking;
pub use super::budget::Entity as Budget;
pub use super::club::Entity as Club;
pub use super::club_member::Entity as ClubMember;
pub use super::expense::Entity as Expense;
pub use super::follow::Entity as Follow;
pub use super::notification::Entity as Notification;
pub use super::story::Entity as Story;
pub use super::story_like::Entity as StoryLike;
pub use super::trip::Entity as Trip;
pub use super::trip_member::Entity as TripMember;
pub use super::user::Entity as User;
pub use super::wallet::Entity as Wallet;
pub use super::wallet_transaction::Entity as WalletTransaction;
