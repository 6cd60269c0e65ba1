//! Request paths of the remote lookup endpoints.
//!
//! Templates use `{name}` placeholders. Values are percent-encoded when
//! substituted, so a username containing `/` stays a single path segment.

use crate::task::domain::{ProjectCode, Username};

/// Checks that a username exists.
pub const USER_CHECK_ROUTE: &str = "/api/v1/user/check/{username}";

/// Checks that a project code exists.
pub const PROJECT_CHECK_ROUTE: &str = "/api/v1/project/checks/{projectCode}";

/// Fetches the manager assigned to a project.
pub const PROJECT_MANAGER_ROUTE: &str = "/api/v1/project/read/manager/{projectCode}";

/// Path for [`USER_CHECK_ROUTE`].
#[must_use]
pub fn user_check_path(username: &Username) -> String {
    expand(USER_CHECK_ROUTE, "{username}", username.as_str())
}

/// Path for [`PROJECT_CHECK_ROUTE`].
#[must_use]
pub fn project_check_path(project_code: &ProjectCode) -> String {
    expand(PROJECT_CHECK_ROUTE, "{projectCode}", project_code.as_str())
}

/// Path for [`PROJECT_MANAGER_ROUTE`].
#[must_use]
pub fn project_manager_path(project_code: &ProjectCode) -> String {
    expand(PROJECT_MANAGER_ROUTE, "{projectCode}", project_code.as_str())
}

fn expand(template: &str, placeholder: &str, value: &str) -> String {
    template.replacen(placeholder, &urlencoding::encode(value), 1)
}
