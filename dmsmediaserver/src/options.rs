use dmsconfig::Config;
use dmslibrary::UserId;

/// Réglages du moteur ContentDirectory
#[derive(Debug, Clone)]
pub struct DlnaOptions {
    /// Préfixe des URL de flux (`res`)
    pub base_url: String,
    /// Titre du container racine
    pub server_name: String,
    /// Utilisateur pour lequel les requêtes sont servies
    pub user_id: UserId,
    pub latest_items_limit: usize,
    pub continue_watching_limit: usize,
}

impl Default for DlnaOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8096".to_string(),
            server_name: "DMS".to_string(),
            user_id: UserId::new(),
            latest_items_limit: 50,
            continue_watching_limit: 10,
        }
    }
}

impl DlnaOptions {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: config.get_base_url(),
            server_name: config.get_server_name(),
            user_id: UserId::from(config.get_dlna_user_id()?),
            latest_items_limit: config.get_latest_items_limit()?,
            continue_watching_limit: config.get_continue_watching_limit()?,
        })
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = user_id;
        self
    }
}
