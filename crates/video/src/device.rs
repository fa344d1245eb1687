use {
    serde::{Deserialize, Serialize},
    std::{
        fmt,
        path::{Path, PathBuf},
    },
};

/// Identifies a camera: a V4L2 index (`/dev/video{n}`) or an explicit path.
///
/// In JSON, numbers select by index and strings select by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeviceSelector {
    Index(usize),
    Path(PathBuf),
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceSelector::Index(index) => write!(f, "/dev/video{}", index),
            DeviceSelector::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<usize> for DeviceSelector {
    fn from(index: usize) -> Self {
        DeviceSelector::Index(index)
    }
}

impl From<PathBuf> for DeviceSelector {
    fn from(path: PathBuf) -> Self {
        DeviceSelector::Path(path)
    }
}

/// List `/dev/video*` nodes, ordered by their numeric suffix.
pub fn list_candidate_devices() -> Vec<DeviceSelector> {
    list_candidate_devices_in(Path::new("/dev"))
}

/// Same as [`list_candidate_devices`], scanning `dir` instead of `/dev`.
pub fn list_candidate_devices_in(dir: &Path) -> Vec<DeviceSelector> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) => {
            log::warn!("cannot list video devices in {}: {}", dir.display(), error);
            return Vec::new();
        }
    };

    let mut found: Vec<(usize, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name();
            let index = name.to_str()?.strip_prefix("video")?.parse::<usize>().ok()?;
            Some((index, entry.path()))
        })
        .collect();
    found.sort_by_key(|(index, _)| *index);

    found
        .into_iter()
        .map(|(_, path)| DeviceSelector::Path(path))
        .collect()
}
