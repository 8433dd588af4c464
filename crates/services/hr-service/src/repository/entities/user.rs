//! User (account) database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::{AppError, AppResult};
use domain::{Account, Profile, Role, RoleName};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
    pub user_image_uri: Option<String>,
    pub company_name: Option<String>,
    pub company_image_uri: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert a row joined with its role into the domain entity.
    pub fn into_account(self, role: Option<super::role::Model>) -> AppResult<Account> {
        let name = match role {
            Some(role) => role.name.parse::<RoleName>()?,
            None => RoleName::from_id(self.role_id).ok_or_else(|| {
                AppError::internal(format!("account {} references unknown role {}", self.id, self.role_id))
            })?,
        };

        Ok(Account {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password,
            role: Role {
                id: self.role_id,
                name,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
            profile: Profile {
                user_image_uri: self.user_image_uri,
                company_name: self.company_name,
                company_image_uri: self.company_image_uri,
            },
        })
    }
}
