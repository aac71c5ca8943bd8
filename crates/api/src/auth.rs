// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use fairline::FairState;
use fairline_domain::Company;

use crate::error::{ApiError, AuthError};
use crate::token_policy::validate_token_format;

/// The authenticated caller of an API operation.
///
/// Fairline has three kinds of callers. Organizers authenticate with the
/// admin key, company booths authenticate with their access token, and
/// student kiosks self-identify by student id without credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    /// A fair organizer holding the admin key.
    ///
    /// Admins may perform:
    /// - company creation, capacity changes, and token rotation
    /// - pausing and resuming companies
    /// - queue inspection and reordering
    /// - corrective actions such as forced inscriptions and student removal
    Admin,
    /// A company booth holding a valid access token.
    ///
    /// Companies act only on their own queue: viewing the dashboard,
    /// pausing themselves, and completing interviews.
    Company {
        /// The id of the authenticated company.
        company_id: i64,
    },
    /// A student kiosk session.
    ///
    /// Kiosks are shared floor terminals. They carry no credential and
    /// may only act on the student they identify.
    Student {
        /// The student the kiosk is acting as.
        student_id: i64,
    },
}

impl Caller {
    /// Returns the role name for logging and error messages.
    #[must_use]
    pub const fn role_name(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Company { .. } => "company",
            Self::Student { .. } => "student",
        }
    }
}

/// Verifies a presented admin key against the configured bcrypt hash.
///
/// # Arguments
///
/// * `presented_key` - The key presented by the caller
/// * `admin_key_hash` - The bcrypt hash the server was configured with
///
/// # Errors
///
/// Returns an error if the hash is malformed or the key does not match.
pub fn verify_admin_key(presented_key: &str, admin_key_hash: &str) -> Result<Caller, AuthError> {
    let matches: bool = bcrypt::verify(presented_key, admin_key_hash).map_err(|e| {
        AuthError::AuthenticationFailed {
            reason: format!("Admin key verification failed: {e}"),
        }
    })?;

    if matches {
        Ok(Caller::Admin)
    } else {
        Err(AuthError::AuthenticationFailed {
            reason: String::from("Invalid admin key"),
        })
    }
}

/// Authenticates a company by its access token.
///
/// The token format is checked first so malformed credentials never
/// reach the comparison loop.
///
/// # Arguments
///
/// * `state` - The current system state
/// * `access_token` - The token presented by the caller
///
/// # Errors
///
/// Returns an error if the token is malformed or matches no company.
pub fn authenticate_company<'a>(
    state: &'a FairState,
    access_token: &str,
) -> Result<&'a Company, ApiError> {
    validate_token_format(access_token)?;

    state
        .companies
        .iter()
        .find(|company| company.access_token.value() == access_token)
        .ok_or_else(|| ApiError::AuthenticationFailed {
            reason: String::from("Unknown access token"),
        })
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether a caller has permission to perform
/// a specific action based on who they are.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a caller is authorized to create a company.
    ///
    /// Only Admin callers may create companies.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_create_company(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("create_company"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to list companies with credentials.
    ///
    /// Only Admin callers may see access tokens. The public company list
    /// is separate and unauthenticated.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_list_companies_admin(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("list_companies_admin"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to change a company's capacity.
    ///
    /// Only Admin callers may change capacity.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_set_capacity(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("set_capacity"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to rotate a company's access token.
    ///
    /// Only Admin callers may rotate tokens.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_regenerate_token(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("regenerate_token"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to pause a company by id.
    ///
    /// Only Admin callers may pause companies by id. A company pauses
    /// itself through its token-authenticated status endpoint instead.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_pause_company(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("pause_company"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to resume a company by id.
    ///
    /// Only Admin callers may resume companies by id.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_resume_company(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("resume_company"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to inspect a company's queue by id.
    ///
    /// Only Admin callers may inspect arbitrary queues. Companies see
    /// their own queue through the token-authenticated dashboard.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_get_company_queue(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("get_company_queue"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to reorder a queue.
    ///
    /// Only Admin callers may reorder queues.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_reorder_queue(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("reorder_queue"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to force an inscription.
    ///
    /// Only Admin callers may inscribe a student past admission checks.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_force_inscribe(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("force_inscribe"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to resume every paused company.
    ///
    /// Only Admin callers may bulk-resume.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_bulk_resume(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("bulk_resume"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to delete a student.
    ///
    /// Only Admin callers may delete students.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    ///
    /// # Errors
    ///
    /// Returns an error if the caller does not have the Admin role.
    pub fn authorize_delete_student(caller: &Caller) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Company { .. } | Caller::Student { .. } => Err(AuthError::Unauthorized {
                action: String::from("delete_student"),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if a caller is authorized to cancel a queue entry.
    ///
    /// Admins may cancel any entry. A student kiosk may cancel only
    /// entries belonging to the student it identifies.
    ///
    /// # Arguments
    ///
    /// * `caller` - The authenticated caller
    /// * `entry_student_id` - The student who owns the entry
    ///
    /// # Errors
    ///
    /// Returns an error if the caller is a company, or a kiosk acting
    /// for a different student.
    pub fn authorize_cancel_inscription(
        caller: &Caller,
        entry_student_id: i64,
    ) -> Result<(), AuthError> {
        match caller {
            Caller::Admin => Ok(()),
            Caller::Student { student_id } if *student_id == entry_student_id => Ok(()),
            Caller::Student { .. } | Caller::Company { .. } => Err(AuthError::Unauthorized {
                action: String::from("cancel_inscription"),
                required_role: String::from("Admin or owning Student"),
            }),
        }
    }
}
