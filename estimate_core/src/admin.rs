//! # Admin Gate
//!
//! Settings edits are only reachable through an [`AdminSession`], obtained
//! by presenting the passcode stored in the rate book. This is a local
//! convenience gate for a shared office tool, not network security; it
//! exists so calculators stay read-only over settings and every mutation
//! funnels through one place.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::admin::AdminSession;
//! use estimate_core::settings::{Settings, SettingsUpdate, PricingUpdate};
//!
//! let mut settings = Settings::default();
//!
//! let session = AdminSession::login(&settings, "tameer-admin").unwrap();
//! session.update_settings(&mut settings, SettingsUpdate {
//!     pricing: Some(PricingUpdate {
//!         brick_price: Some(16.0),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! }).unwrap();
//!
//! assert!(AdminSession::login(&settings, "wrong").is_err());
//! ```

use uuid::Uuid;

use crate::errors::{EstimateError, EstimateResult};
use crate::resources::{self, NewResource, Resource};
use crate::settings::{Settings, SettingsUpdate};

/// Proof of a successful admin login.
///
/// Holding a session is what authorizes settings mutations; there is no
/// other public path to them.
#[derive(Debug)]
pub struct AdminSession {
    // Private field so a session cannot be constructed outside login()
    _private: (),
}

impl AdminSession {
    /// Authenticate against the passcode in the rate book.
    ///
    /// # Returns
    ///
    /// * `Ok(AdminSession)` - Passcode matched
    /// * `Err(EstimateError::Unauthorized)` - Wrong passcode
    pub fn login(settings: &Settings, passcode: &str) -> EstimateResult<Self> {
        if passcode == settings.admin.passcode {
            Ok(AdminSession { _private: () })
        } else {
            Err(EstimateError::unauthorized("Incorrect admin passcode"))
        }
    }

    /// Apply a partial settings update.
    pub fn update_settings(
        &self,
        settings: &mut Settings,
        update: SettingsUpdate,
    ) -> EstimateResult<()> {
        settings.apply(update)
    }

    /// Add a resource to the library, returning its assigned id.
    pub fn add_resource(
        &self,
        settings: &mut Settings,
        new: NewResource,
    ) -> EstimateResult<Uuid> {
        let id = resources::add_resource(&mut settings.resources, new)?;
        settings.touch();
        Ok(id)
    }

    /// Remove a resource from the library by id.
    pub fn remove_resource(
        &self,
        settings: &mut Settings,
        id: Uuid,
    ) -> EstimateResult<Resource> {
        let removed = resources::remove_resource(&mut settings.resources, id)?;
        settings.touch();
        Ok(removed)
    }

    /// Change the admin passcode.
    pub fn set_passcode(
        &self,
        settings: &mut Settings,
        new_passcode: &str,
    ) -> EstimateResult<()> {
        if new_passcode.trim().is_empty() {
            return Err(EstimateError::invalid_input(
                "passcode",
                new_passcode,
                "Passcode must not be empty",
            ));
        }
        settings.admin.passcode = new_passcode.to_string();
        settings.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceKind;
    use crate::settings::{PricingUpdate, SettingsUpdate};

    fn new_resource() -> NewResource {
        NewResource {
            title: "Steel Bar Weight Chart".to_string(),
            description: "Running weight per sutar size".to_string(),
            category: "Formulas".to_string(),
            url: "https://example.com/steel-weights.pdf".to_string(),
            kind: ResourceKind::Pdf,
        }
    }

    #[test]
    fn test_login_with_default_passcode() {
        let settings = Settings::default();
        assert!(AdminSession::login(&settings, "tameer-admin").is_ok());
    }

    #[test]
    fn test_wrong_passcode_rejected() {
        let settings = Settings::default();
        let err = AdminSession::login(&settings, "guess").unwrap_err();
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }

    #[test]
    fn test_session_mutations() {
        let mut settings = Settings::default();
        let session = AdminSession::login(&settings, "tameer-admin").unwrap();

        session
            .update_settings(
                &mut settings,
                SettingsUpdate {
                    pricing: Some(PricingUpdate {
                        labor_cost_per_day: Some(1800.0),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(settings.pricing.labor_cost_per_day, 1800.0);

        let before = settings.resources.len();
        let id = session.add_resource(&mut settings, new_resource()).unwrap();
        assert_eq!(settings.resources.len(), before + 1);

        session.remove_resource(&mut settings, id).unwrap();
        assert_eq!(settings.resources.len(), before);
    }

    #[test]
    fn test_passcode_change_invalidates_old_login() {
        let mut settings = Settings::default();
        let session = AdminSession::login(&settings, "tameer-admin").unwrap();

        session.set_passcode(&mut settings, "site-office-7").unwrap();
        assert!(AdminSession::login(&settings, "tameer-admin").is_err());
        assert!(AdminSession::login(&settings, "site-office-7").is_ok());
    }

    #[test]
    fn test_empty_passcode_rejected() {
        let mut settings = Settings::default();
        let session = AdminSession::login(&settings, "tameer-admin").unwrap();
        assert!(session.set_passcode(&mut settings, "   ").is_err());
    }
}
