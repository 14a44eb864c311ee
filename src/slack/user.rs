
#[derive(Deserialize, Debug, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub profile: UserProfile,
}

impl UserInfo {
    /// Email on file, if Slack shared a non-empty one.
    pub fn email(&self) -> Option<&str> {
        self.profile.email.as_deref().filter(|e| !e.is_empty())
    }
}
