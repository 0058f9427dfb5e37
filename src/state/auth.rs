use tracing::info;

use super::data::UserProfile;

/// Login flag plus the profile of the signed-in user.
///
/// The store never talks to the OAuth provider; callers drive it once the
/// provider has answered.
#[derive(Debug, Clone, Default)]
pub struct AuthStore {
    is_logged_in: bool,
    user_info: UserProfile,
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `profile` and mark the session as logged in.
    pub fn login(&mut self, profile: UserProfile) {
        info!("Logged in as {}", profile.display_name());
        self.update_user_profile(profile);
        self.is_logged_in = true;
    }

    /// Clear the login flag. The last profile stays until overwritten.
    pub fn logout(&mut self) {
        info!("Logged out");
        self.is_logged_in = false;
    }

    pub fn update_user_profile(&mut self, profile: UserProfile) {
        self.user_info = profile;
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn user_info(&self) -> &UserProfile {
        &self.user_info
    }
}
