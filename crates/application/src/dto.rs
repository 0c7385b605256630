//! Data Transfer Objects for the application layer.
//!
//! DTOs are used to transfer data between layers without exposing domain
//! entities.

use validator::Validate;

/// Profile section of a provider callback.
#[derive(Debug, Clone, Default)]
pub struct ProviderProfileDto {
    /// Preferred handle on the provider.
    pub nickname: Option<String>,
    /// Account name, used when there is no nickname.
    pub username: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    /// Short bio.
    pub description: Option<String>,
    /// Ordered `(label, url)` pairs, e.g. `("Blog", "https://...")`.
    pub urls: Vec<(String, String)>,
}

/// Payload received when an external provider authenticates someone.
#[derive(Debug, Clone, Default)]
pub struct ProviderCallbackDto {
    /// Provider name, e.g. `github`.
    pub provider: String,
    /// Subject identifier assigned by the provider.
    pub uid: String,
    pub info: ProviderProfileDto,
}

/// Request DTO for a profile and/or credential update.
///
/// `verified` and `replies_count` are intentionally absent: they cannot be
/// mass-assigned.
#[derive(Debug, Clone, Default, Validate)]
pub struct ProfileUpdateDto {
    pub current_password: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    #[validate(email(message = "Email must be formatted."))]
    pub email: Option<String>,
    #[validate(length(max = 64, message = "Location must be at most 64 characters."))]
    pub location: Option<String>,
    #[validate(length(max = 1024, message = "Bio must be at most 1024 characters."))]
    pub bio: Option<String>,
    #[validate(length(max = 140, message = "Tagline must be at most 140 characters."))]
    pub tagline: Option<String>,
    #[validate(url(message = "Website must be a valid URL."))]
    pub website: Option<String>,
    #[validate(length(max = 39, message = "GitHub handle must be at most 39 characters."))]
    pub github: Option<String>,
}

impl ProfileUpdateDto {
    /// Whether any credential field carries a non-blank value.
    pub fn touches_credentials(&self) -> bool {
        [
            &self.current_password,
            &self.password,
            &self.password_confirmation,
        ]
        .into_iter()
        .any(|field| !domain::auth::policy::is_blank(field.as_deref()))
    }
}

/// Request DTO for local account registration.
#[derive(Debug, Clone, Default, Validate)]
pub struct RegisterRequestDto {
    pub login: String,
    #[validate(email(message = "Email must be formatted."))]
    pub email: String,
    pub password: String,
    pub password_confirmation: Option<String>,
}

/// Request DTO for local authentication.
#[derive(Debug, Clone)]
pub struct AuthRequestDto {
    pub email: String,
    pub password: String,
}
