/// Who is using the app. Established once at startup and cleared on
/// sign-out; views receive it instead of probing ambient storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    SignedIn {
        user_id: String,
        access_token: String,
    },
}

impl Session {
    /// Both values are needed to sign in; anything less is anonymous.
    pub fn from_credentials(user_id: Option<String>, access_token: Option<String>) -> Self {
        match (user_id, access_token) {
            (Some(user_id), Some(access_token))
                if !user_id.trim().is_empty() && !access_token.trim().is_empty() =>
            {
                Self::SignedIn {
                    user_id: user_id.trim().to_string(),
                    access_token: access_token.trim().to_string(),
                }
            }
            _ => Self::Anonymous,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Self::SignedIn { .. })
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::SignedIn { user_id, .. } => Some(user_id),
            Self::Anonymous => None,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        match self {
            Self::SignedIn { access_token, .. } => Some(access_token),
            Self::Anonymous => None,
        }
    }

    pub fn sign_out(&mut self) {
        *self = Self::Anonymous;
    }
}
