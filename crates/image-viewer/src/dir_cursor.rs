use eapp_utils::natordset::NatOrdSet;
use std::path::{Path, PathBuf};

/// Extensions the viewer opens and pages through, compared case-insensitively
pub const SUPPORTED_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff", "gif"];

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// Sibling images of the opened file, with the position of the one on screen.
///
/// `index` is `None` when the opened file itself is not part of the listing
/// (e.g. an extension outside [`SUPPORTED_EXTENSIONS`]); navigation is then a no-op.
#[derive(Default, Clone, Debug)]
pub struct DirCursor {
    dir: PathBuf,
    names: NatOrdSet,
    index: Option<usize>,
}

impl DirCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_image(image_path: &Path) -> std::io::Result<Self> {
        let dir = image_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();

        let mut names = NatOrdSet::new();
        for item in std::fs::read_dir(&dir)? {
            let item = match item {
                Ok(item) => item.path(),
                Err(err) => {
                    log::warn!("read dir item fails: {err}");
                    continue;
                }
            };

            if !item.is_file() || !is_supported_image(&item) {
                continue;
            }

            match item.file_name().and_then(|name| name.to_str()) {
                Some(name) => names.push(name.to_owned()),
                None => log::warn!("skip non utf-8 file name '{}'", item.display()),
            }
        }
        names.sort();

        let index = image_path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| names.position(name));

        Ok(Self { dir, names, index })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn current(&self) -> Option<PathBuf> {
        self.index
            .and_then(|index| self.names.get(index))
            .map(|name| self.dir.join(name))
    }

    /// Step forward, `None` (index untouched) when already at the last image
    pub fn next(&mut self) -> Option<PathBuf> {
        let index = self.index?;
        if index + 1 >= self.names.len() {
            return None;
        }

        self.index = Some(index + 1);
        self.current()
    }

    /// Step backward, `None` (index untouched) when already at the first image
    pub fn prev(&mut self) -> Option<PathBuf> {
        let index = self.index?.checked_sub(1)?;
        self.index = Some(index);
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_all(dir: &Path, names: &[&str]) {
        for name in names {
            std::fs::write(dir.join(name), b"").unwrap();
        }
    }

    #[test]
    fn extension_match_ignores_case() {
        assert!(is_supported_image(Path::new("a/b/photo.JPG")));
        assert!(is_supported_image(Path::new("scan.Tif")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("no_extension")));
    }

    #[test]
    fn pages_through_siblings_and_stops_at_the_ends() {
        let tmp = tempfile::tempdir().unwrap();
        touch_all(tmp.path(), &["a.png", "b.jpg", "c.bmp", "readme.txt"]);
        std::fs::create_dir(tmp.path().join("d.png")).unwrap();

        let mut cursor = DirCursor::from_image(&tmp.path().join("b.jpg")).unwrap();
        assert_eq!(cursor.len(), 3);
        assert_eq!(cursor.index(), Some(1));

        assert_eq!(cursor.next(), Some(tmp.path().join("c.bmp")));
        assert_eq!(cursor.index(), Some(2));

        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.index(), Some(2));

        assert_eq!(cursor.prev(), Some(tmp.path().join("b.jpg")));
        assert_eq!(cursor.prev(), Some(tmp.path().join("a.png")));
        assert_eq!(cursor.prev(), None);
        assert_eq!(cursor.index(), Some(0));
    }

    #[test]
    fn unlisted_file_has_no_index_and_does_not_navigate() {
        let tmp = tempfile::tempdir().unwrap();
        touch_all(tmp.path(), &["a.png", "b.png", "odd.webp"]);

        let mut cursor = DirCursor::from_image(&tmp.path().join("odd.webp")).unwrap();
        assert_eq!(cursor.len(), 2);
        assert_eq!(cursor.index(), None);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.prev(), None);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let gone = tmp.path().join("gone").join("a.png");
        assert!(DirCursor::from_image(&gone).is_err());
    }

    #[test]
    fn default_cursor_is_inert() {
        let mut cursor = DirCursor::new();
        assert!(cursor.is_empty());
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.prev(), None);
    }
}
