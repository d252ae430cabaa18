#[cfg(test)]
pub mod test {
    use std::collections::BTreeMap;

    use serde::Serialize;
    use tempfile::TempDir;

    use crate::store::Configstore;

    /// A value JSON cannot represent: map keys must be strings.
    #[derive(Serialize, Debug)]
    pub struct Unserializable {
        pub label: &'static str,
        pub grid: BTreeMap<(u8, u8), u8>,
    }

    impl Unserializable {
        pub fn new() -> Self {
            let mut grid = BTreeMap::new();
            grid.insert((0, 0), 1);
            Self {
                label: "grid",
                grid,
            }
        }
    }

    #[derive(Serialize, Debug, Clone, PartialEq, serde::Deserialize)]
    pub struct Window {
        pub width: u32,
        pub height: u32,
        pub maximized: bool,
    }

    /// A named store sandboxed under a fresh temp base directory.
    ///
    /// The `TempDir` must be kept alive for the duration of the test.
    pub fn sandboxed(name: &str) -> (TempDir, Configstore) {
        let dir = TempDir::new().unwrap();
        let store = Configstore::builder(name).base_dir(dir.path()).build();
        (dir, store)
    }

    #[test]
    fn unserializable_fails_to_serialize() {
        assert!(serde_json::to_value(Unserializable::new()).is_err());
    }

    #[test]
    fn sandboxed_store_lives_in_temp_dir() {
        let (dir, store) = sandboxed("fixture-app");
        assert!(store.path().starts_with(dir.path()));
        assert!(!store.path().exists());
    }
}
