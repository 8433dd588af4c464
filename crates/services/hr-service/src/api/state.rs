//! Application state for dependency injection.

use std::sync::Arc;

use crate::config::HrServiceConfig;
use crate::credentials::Credentials;
use crate::infra::{Database, ObjectStorage};
use crate::repository::{AccountStore, DepartmentStore, EmployeeStore};
use crate::service::{
    AccountManager, AccountService, AuthService, Authenticator, DepartmentManager,
    DepartmentService, EmployeeManager, EmployeeService, FileService, Uploader,
};

/// Application state shared across handlers. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountService>,
    pub auth: Arc<dyn AuthService>,
    pub departments: Arc<dyn DepartmentService>,
    pub employees: Arc<dyn EmployeeService>,
    pub files: Arc<dyn FileService>,
    pub database: Database,
    pub config: Arc<HrServiceConfig>,
}

impl AppState {
    /// Wire the SeaORM-backed stores and services.
    pub fn new(
        database: Database,
        storage: Arc<dyn ObjectStorage>,
        config: HrServiceConfig,
    ) -> Self {
        let credentials = Arc::new(Credentials::new(&config.jwt));

        let account_repo = Arc::new(AccountStore::new(database.get_connection()));
        let department_repo = Arc::new(DepartmentStore::new(database.get_connection()));
        let employee_repo = Arc::new(EmployeeStore::new(database.get_connection()));

        let accounts: Arc<dyn AccountService> =
            Arc::new(AccountManager::new(account_repo.clone(), credentials.clone()));
        let auth = Arc::new(Authenticator::new(accounts.clone(), account_repo, credentials));

        Self {
            accounts,
            auth,
            departments: Arc::new(DepartmentManager::new(department_repo.clone())),
            employees: Arc::new(EmployeeManager::new(employee_repo, department_repo)),
            files: Arc::new(Uploader::new(storage)),
            database,
            config: Arc::new(config),
        }
    }
}
