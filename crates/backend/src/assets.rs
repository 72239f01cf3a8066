use callout_shared::models::{map_image_name, MAPS};
use std::path::{Path, PathBuf};

/// Map images found under `<assets_dir>/maps` at startup.
pub struct MapImages {
    pub dir: PathBuf,
    pub present: Vec<&'static str>,
    pub missing: Vec<&'static str>,
}

impl MapImages {
    pub fn scan(assets_dir: &Path) -> Self {
        let dir = assets_dir.join("maps");
        let (present, missing) = MAPS
            .iter()
            .copied()
            .partition(|map| dir.join(map_image_name(map)).is_file());

        let images = MapImages {
            dir,
            present,
            missing,
        };
        images.report();
        images
    }

    fn report(&self) {
        tracing::info!(
            dir = %self.dir.display(),
            found = self.present.len(),
            total = MAPS.len(),
            "Scanned map images"
        );
        for map in &self.missing {
            tracing::warn!(
                map = %map,
                expected = %self.dir.join(map_image_name(map)).display(),
                "Map image missing"
            );
        }
    }
}
