use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Password reset token database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "password_reset_tokens")]
pub struct Model {
    /// Row ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// User the token was issued for
    pub user_id: Uuid,

    /// Token value (unique)
    #[sea_orm(unique)]
    pub token: String,

    /// Expiration timestamp
    pub expires_at: DateTimeWithTimeZone,

    /// Creation timestamp
    pub created_at: DateTimeWithTimeZone,

    /// When the token was consumed (single use)
    pub used_at: Option<DateTimeWithTimeZone>,
}

/// Password reset token entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// User relation
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
