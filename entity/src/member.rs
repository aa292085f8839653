use sea_orm::entity::prelude::*;

/// A gym member record.
///
/// `joined_date` and `end_date` are stored as ISO `YYYY-MM-DD` text, which keeps
/// lexicographic ordering identical to calendar ordering.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub mobile: String,
    pub plan: String,
    pub package: String,
    pub joined_date: String,
    pub end_date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
