use std::sync::atomic::{AtomicU32, Ordering};

static SYSTEM_UPDATE_ID: AtomicU32 = AtomicU32::new(1);

/// Valeur courante de SystemUpdateID
pub fn system_update_id() -> u32 {
    SYSTEM_UPDATE_ID.load(Ordering::Relaxed)
}

/// Signale une modification de la bibliothèque et retourne le nouveau SystemUpdateID
pub fn notify_library_changed() -> u32 {
    let new_id = SYSTEM_UPDATE_ID
        .fetch_add(1, Ordering::Relaxed)
        .wrapping_add(1);
    tracing::info!("ContentDirectory: SystemUpdateID -> {}", new_id);
    new_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_id_increases() {
        let before = system_update_id();
        let after = notify_library_changed();
        assert!(after > before);
        assert!(system_update_id() >= after);
    }
}
