//! Seed data standing in for what a server-rendered form would embed.

use form_widgets::{combobox::ComboboxOption, RemoteFile, UploaderConfig};
use leptos::logging;

const STORED_MEDIA_JSON: &str = r#"[
  { "id": 101, "name": "storefront.jpg", "size": 248312, "type": "image/jpeg", "url": "https://picsum.photos/id/101/320/200" },
  { "id": 102, "name": "menu-2024.pdf", "size": 1184022, "type": "application/pdf", "url": "/media/102/menu-2024.pdf" },
  { "id": 103, "name": "interior.jpg", "size": 512904, "type": "image/jpeg", "url": "https://picsum.photos/id/103/320/200" }
]"#;

const GALLERY_CONFIG_JSON: &str = r#"{ "max_files": 6, "max_size_mb": 5 }"#;

const AVATAR_CONFIG_JSON: &str = r#"{
  "single_file": true,
  "accept": "image/png,image/jpeg,.webp",
  "max_size_mb": 2,
  "removed_field_name": "removed_avatar"
}"#;

pub(crate) fn stored_media() -> Vec<RemoteFile> {
    RemoteFile::list_from_json(STORED_MEDIA_JSON).unwrap_or_else(|err| {
        logging::warn!("stored media seed is invalid: {err}");
        Vec::new()
    })
}

fn config_from_json(raw: &str, label: &str) -> UploaderConfig {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        logging::warn!("{label} uploader config is invalid, using defaults: {err}");
        UploaderConfig::default()
    })
}

pub(crate) fn gallery_config() -> UploaderConfig {
    config_from_json(GALLERY_CONFIG_JSON, "gallery")
}

pub(crate) fn avatar_config() -> UploaderConfig {
    config_from_json(AVATAR_CONFIG_JSON, "avatar")
}

pub(crate) fn cuisine_options() -> Vec<ComboboxOption> {
    [
        ("italian", "Italian"),
        ("japanese", "Japanese"),
        ("mexican", "Mexican"),
        ("levantine", "Levantine"),
        ("thai", "Thai"),
        ("vegan", "Plant-based"),
    ]
    .into_iter()
    .map(|(value, label)| ComboboxOption::new(value, label))
    .collect()
}

#[cfg(test)]
mod tests {
    use form_widgets::RemoteFileId;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn seeds_parse() {
        let media = stored_media();
        assert_eq!(
            media.iter().map(|file| file.id).collect::<Vec<_>>(),
            vec![RemoteFileId(101), RemoteFileId(102), RemoteFileId(103)]
        );
        assert!(media[0].is_image());
        assert!(!media[1].is_image());

        let gallery = gallery_config();
        assert_eq!((gallery.max_files, gallery.max_size_mb), (6, 5));
        assert!(gallery.auto_upload);

        let avatar = avatar_config();
        assert!(avatar.single_file);
        assert_eq!(avatar.effective_max_files(), 1);
        assert!(avatar.accept.accepts("me.webp", ""));
        assert!(!avatar.accept.accepts("me.gif", "image/gif"));
        assert_eq!(avatar.removed_field_name, "removed_avatar");
    }
}
