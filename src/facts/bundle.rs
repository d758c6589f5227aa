//! Listing the contents of packaged artifact bundles.

use crate::Result;
use flate2::read::GzDecoder;
use ohno::IntoAppError;
use std::collections::BTreeSet;
use std::io::Read;

/// Upper bound on the number of entries read from a single bundle.
const MAX_ENTRIES: usize = 10_000;

/// List the files contained in a gzip-compressed tarball.
///
/// Paths use forward slashes. When every file lives under a single top-level directory (as in
/// `widget-1.0/src/lib.py`), that directory is stripped so listings look like repository paths.
pub fn list_files(bytes: impl Read) -> Result<BTreeSet<String>> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    let mut paths = Vec::new();

    for entry in archive.entries().into_app_err("reading bundle entries")? {
        let entry = entry.into_app_err("reading bundle entry")?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry.path().into_app_err("decoding bundle entry path")?;
        let path = path.to_string_lossy().replace('\\', "/");
        let path = path.trim_start_matches("./").to_string();
        if !path.is_empty() {
            paths.push(path);
        }

        if paths.len() >= MAX_ENTRIES {
            break;
        }
    }

    Ok(strip_common_root(paths).into_iter().collect())
}

fn strip_common_root(paths: Vec<String>) -> Vec<String> {
    let Some(root) = paths.first().and_then(|p| p.split_once('/')).map(|(root, _)| format!("{root}/")) else {
        return paths;
    };

    if paths.iter().all(|p| p.starts_with(&root)) {
        paths
            .into_iter()
            .map(|mut p| {
                let _ = p.drain(..root.len());
                p
            })
            .filter(|p| !p.is_empty())
            .collect()
    } else {
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;

    fn make_bundle(files: &[&str]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for file in files {
            let data = b"x";
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, file, &data[..]).unwrap();
        }
        builder.into_inner().unwrap().finish().unwrap()
    }

    #[test]
    fn lists_files_and_strips_common_root() {
        let bundle = make_bundle(&["widget-1.0/README.md", "widget-1.0/tests/test_widget.py"]);
        let files = list_files(bundle.as_slice()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.contains("README.md"));
        assert!(files.contains("tests/test_widget.py"));
    }

    #[test]
    fn keeps_paths_without_common_root() {
        let bundle = make_bundle(&["README.md", "src/model.py"]);
        let files = list_files(bundle.as_slice()).unwrap();

        assert!(files.contains("README.md"));
        assert!(files.contains("src/model.py"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(list_files(&b"not a tarball"[..]).is_err());
    }
}
