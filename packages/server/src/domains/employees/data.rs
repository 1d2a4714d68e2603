//! GraphQL data types for the employee directory

use chrono::{DateTime, Utc};
use juniper::{GraphQLEnum, GraphQLInputObject, GraphQLObject};
use uuid::Uuid;

use crate::domains::employees::models::Employee;

/// Employee role for GraphQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, GraphQLEnum)]
pub enum EmployeeRoleData {
    Admin,
    Manager,
    Standard,
}

impl From<&str> for EmployeeRoleData {
    fn from(s: &str) -> Self {
        match s {
            "admin" => EmployeeRoleData::Admin,
            "manager" => EmployeeRoleData::Manager,
            _ => EmployeeRoleData::Standard,
        }
    }
}

/// GraphQL type for Employee
#[derive(Debug, Clone, GraphQLObject)]
pub struct EmployeeData {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: EmployeeRoleData,
    pub is_active: bool,
    pub hired_at: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeData {
    fn from(e: Employee) -> Self {
        Self {
            id: e.id.into_uuid(),
            full_name: e.full_name,
            email: e.email,
            phone: e.phone,
            role: EmployeeRoleData::from(e.role.as_str()),
            is_active: e.is_active,
            hired_at: e.hired_at.map(|d| d.to_string()),
            created_at: e.created_at,
        }
    }
}

/// Input for creating an employee (admin)
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct CreateEmployeeInput {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: EmployeeRoleData,
    /// ISO date (YYYY-MM-DD)
    pub hired_at: Option<String>,
}

/// Input for updating an employee (admin)
#[derive(Debug, Clone, GraphQLInputObject)]
pub struct UpdateEmployeeInput {
    pub full_name: String,
    pub phone: Option<String>,
    pub role: EmployeeRoleData,
}
