//! Manifest loading integration tests
//!
//! Tests manifest discovery on disk, conversion into ProgIds and
//! installing a registrar built from a manifest.

mod common;

use camino::Utf8PathBuf;
use common::*;
use shellreg_core::config::MANIFEST_FILE_NAMES;
use shellreg_core::{Error, Hive, LoadedManifest, Manifest, MemoryKeyStore, Verb};
use tempfile::TempDir;

const FULL_MANIFEST: &str = r#"
app:
  name: Foo
  display_name: Foo Editor
  exe_path: 'C:\Program Files\Foo\Foo.exe'
prog_ids:
  - prog_ext: doc
    description: Foo Document
    icon: resources\doc.ico
    content_type: application/x-foo
    friendly_app_name: true
    extensions:
      - foo
      - { name: foodoc, set_default: true }
    shell:
      - verb: open
        selected: true
      - verb: edit
        action: Edit with Foo
        args: ["--edit", "%1"]
  - prog_ext: tpl
    hive: local-machine
    extensions: [.footpl]
"#;

fn temp_dir() -> (TempDir, Utf8PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    (dir, path)
}

#[cfg(test)]
mod manifest_loading {
    use super::*;

    #[test]
    fn test_load_explicit_path() {
        let (_dir, root) = temp_dir();
        let path = root.join("custom.yaml");
        std::fs::write(&path, FULL_MANIFEST).unwrap();

        let loaded = LoadedManifest::load(Some(&path)).unwrap();

        assert_eq!(loaded.path, path);
        assert_eq!(loaded.manifest.app.name, "Foo");
        assert_eq!(loaded.manifest.prog_ids.len(), 2);
        assert_eq!(loaded.manifest.prog_ids[1].hive, Hive::LocalMachine);
    }

    #[test]
    fn test_find_manifest_prefers_yaml_over_yml() {
        let (_dir, root) = temp_dir();
        for name in MANIFEST_FILE_NAMES {
            std::fs::write(root.join(name), FULL_MANIFEST).unwrap();
        }

        let found = LoadedManifest::find_manifest(&root).unwrap();
        assert_eq!(found.file_name(), Some("shellreg.yaml"));
    }

    #[test]
    fn test_find_manifest_yml_fallback() {
        let (_dir, root) = temp_dir();
        std::fs::write(root.join("shellreg.yml"), FULL_MANIFEST).unwrap();

        let found = LoadedManifest::find_manifest(&root).unwrap();
        assert_eq!(found.file_name(), Some("shellreg.yml"));
    }

    #[test]
    fn test_missing_manifest() {
        let (_dir, root) = temp_dir();

        let err = LoadedManifest::load(Some(&root.join("shellreg.yaml"))).unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { .. }));
        assert!(matches!(
            LoadedManifest::find_manifest(&root).unwrap_err(),
            Error::ManifestNotFound { .. }
        ));
    }

    #[test]
    fn test_invalid_prog_id_reports_index() {
        let yaml = r#"
app: { name: Foo, exe_path: 'C:\Foo.exe' }
prog_ids:
  - prog_ext: doc
  - prog_ext: "bad\\ext"
"#;
        let manifest = Manifest::from_yaml(yaml).unwrap();
        let host = manifest.host().unwrap();

        let err = manifest.registrar(&host).unwrap_err();
        assert!(err.to_string().contains("prog_ids[1]"));
    }

    #[test]
    fn test_manifest_builds_prog_ids() {
        let manifest = Manifest::from_yaml(FULL_MANIFEST).unwrap();
        let host = manifest.host().unwrap();
        assert_eq!(host.display_name, APP_DISPLAY_NAME);
        assert_eq!(host.exe_path, PLAIN_EXE);

        let registrar = manifest.registrar(&host).unwrap();
        let doc = registrar.get("Foo.doc").unwrap();
        let verbs: Vec<Verb> = doc.shell_options().iter().map(|o| o.verb()).collect();
        assert_eq!(verbs, [Verb::Open, Verb::Edit]);
        assert!(doc.extensions()[1].set_default);

        let tpl = registrar.get("Foo.tpl").unwrap();
        assert_eq!(tpl.base_key().to_string(), r"HKLM\Software\Classes\Foo.tpl");
        assert_eq!(tpl.extensions()[0].name, "footpl");
    }

    #[tokio::test]
    async fn test_install_from_manifest() {
        let mut manifest = Manifest::from_yaml(FULL_MANIFEST).unwrap();
        manifest.app.exe_path = Some(PLAIN_EXE.to_string());
        let mut host = manifest.host().unwrap();
        host.platform = shellreg_core::Platform::Windows;
        let store = MemoryKeyStore::new();

        let report = manifest
            .registrar(&host)
            .unwrap()
            .install_all(&store, &host)
            .await;

        assert!(report.is_success());
        let base = classes_key("Foo.doc");
        assert_default_value(&store, &base.join("shell"), "open");
        assert_value(
            &store,
            &base.join(r"shell\open"),
            "FriendlyAppName",
            APP_DISPLAY_NAME,
        );
        assert_default_value(&store, &classes_key(".foodoc"), "Foo.doc");
    }
}
