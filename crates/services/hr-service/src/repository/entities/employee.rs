//! Employee database entity for SeaORM.

use sea_orm::entity::prelude::*;

use common::AppResult;
use domain::{Employee, Gender};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub identity_number: String,
    pub name: String,
    pub employee_image_uri: String,
    pub gender: String,
    pub department_id: i32,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::department::Entity",
        from = "Column::DepartmentId",
        to = "super::department::Column::Id"
    )]
    Department,
}

impl Related<super::department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_employee(self) -> AppResult<Employee> {
        Ok(Employee {
            id: self.id,
            identity_number: self.identity_number,
            name: self.name,
            employee_image_uri: self.employee_image_uri,
            gender: self.gender.parse::<Gender>()?,
            department_id: self.department_id,
            created_at: self.created_at,
        })
    }
}
