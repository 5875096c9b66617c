//! Travel club service.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{club::ClubRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        club::{Club, ClubMember, ClubRole, CreateClubParams},
        notification::{NotificationKind, SendNotificationParams},
        pagination::Page,
        user::User,
    },
    service::notification::NotificationService,
};

pub struct ClubService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ClubService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a club with its creator as owner member.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Empty name
    /// - `Err(AppError::Conflict)` - Name already taken
    pub async fn create(&self, params: CreateClubParams) -> Result<Club, AppError> {
        if params.name.is_empty() {
            return Err(AppError::BadRequest("Club name is required".to_string()));
        }
        if ClubRepository::new(self.db).name_exists(&params.name).await? {
            return Err(AppError::Conflict("A club with this name already exists".to_string()));
        }

        let owner_id = params.owner_id;
        let txn = self.db.begin().await?;

        let club_repo = ClubRepository::new(&txn);
        let mut club = club_repo.create(params).await?;
        club_repo.add_member(club.id, owner_id, ClubRole::Owner).await?;

        txn.commit().await?;

        club.member_count = 1;

        Ok(club)
    }

    pub async fn list(&self, page: u64, per_page: u64) -> Result<Page<Club>, AppError> {
        let (clubs, total) = ClubRepository::new(self.db).list(page, per_page).await?;

        Ok(Page::new(clubs, total, page, per_page))
    }

    pub async fn get(&self, club_id: i32) -> Result<Club, AppError> {
        ClubRepository::new(self.db)
            .find_by_id(club_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Club not found".to_string()))
    }

    /// Members of a club with their user summaries, in join order.
    pub async fn members(&self, club_id: i32) -> Result<Vec<ClubMember>, AppError> {
        self.get(club_id).await?;

        let members = ClubRepository::new(self.db).members(club_id).await?;
        let ids: Vec<i32> = members.iter().map(|(id, _, _)| *id).collect();
        let mut summaries = UserRepository::new(self.db).find_summaries(&ids).await?;

        Ok(members
            .into_iter()
            .filter_map(|(id, role, joined_at)| {
                summaries.remove(&id).map(|user| ClubMember {
                    user,
                    role,
                    joined_at,
                })
            })
            .collect())
    }

    /// Joins a public club and notifies its owner.
    ///
    /// # Returns
    /// - `Err(AuthError::AccessDenied)` - Club is private
    /// - `Err(AppError::Conflict)` - Already a member
    pub async fn join(&self, club_id: i32, user_id: i32) -> Result<(), AppError> {
        let club = self.get(club_id).await?;
        let repo = ClubRepository::new(self.db);

        if repo.find_member_role(club_id, user_id).await?.is_some() {
            return Err(AppError::Conflict("Already a member of this club".to_string()));
        }
        if club.is_private {
            return Err(AuthError::AccessDenied(
                user_id,
                format!("Club {} is private", club_id),
            )
            .into());
        }

        repo.add_member(club_id, user_id, ClubRole::Member).await?;

        let name = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .map(|u| u.display_name)
            .unwrap_or_else(|| "Someone".to_string());

        NotificationService::new(self.db)
            .notify(SendNotificationParams {
                user_id: club.owner_id,
                kind: NotificationKind::ClubJoin,
                title: "New club member".to_string(),
                message: format!("{} joined {}", name, club.name),
                data: serde_json::json!({ "club_id": club_id, "user_id": user_id }),
            })
            .await;

        Ok(())
    }

    /// Leaves a club. The owner cannot leave.
    pub async fn leave(&self, club_id: i32, user_id: i32) -> Result<(), AppError> {
        let repo = ClubRepository::new(self.db);

        match repo.find_member_role(club_id, user_id).await? {
            None => Err(AppError::NotFound("Not a member of this club".to_string())),
            Some(ClubRole::Owner) => Err(AppError::BadRequest(
                "The owner cannot leave the club".to_string(),
            )),
            Some(_) => {
                repo.remove_member(club_id, user_id).await?;
                Ok(())
            }
        }
    }

    /// Deletes a club; allowed for its owner and for admins.
    pub async fn delete(&self, club_id: i32, user: &User) -> Result<(), AppError> {
        let club = self.get(club_id).await?;
        if club.owner_id != user.id && !user.admin {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("User may not delete club {}", club_id),
            )
            .into());
        }

        ClubRepository::new(self.db).delete(club_id).await?;

        Ok(())
    }
}
