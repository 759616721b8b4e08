use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{COMPOSE_FILES, TemplateError};
use crate::domain::{ContainerInfo, ContainerMap, ContainerName};

/// Find every compose project below `templates_dir`.
///
/// A compose file directly inside `templates_dir` is not a project; each
/// project is named after the directory holding its compose file.
/// Symlinked directories are not descended into.
pub fn scan_dir(templates_dir: &Path) -> Result<ContainerMap, TemplateError> {
    let root = fs::canonicalize(templates_dir).map_err(TemplateError::io(templates_dir))?;
    if !root.is_dir() {
        return Err(TemplateError::NotADirectory(templates_dir.to_path_buf()));
    }

    let mut map = ContainerMap::new();
    let mut pending = vec![root.clone()];

    while let Some(dir) = pending.pop() {
        let mut entries = fs::read_dir(&dir)
            .map_err(TemplateError::io(&dir))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(TemplateError::io(&dir))?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let path = entry.path();
            let file_type = entry.file_type().map_err(TemplateError::io(&path))?;
            if file_type.is_dir() {
                pending.push(path);
                continue;
            }
            if dir == root || !is_compose_file(&path) {
                continue;
            }
            if let Some(info) = project_entry(&dir) {
                debug!(name = %info.name, dir = %dir.display(), "Found compose template");
                map.insert(info);
            }
        }
    }

    Ok(map)
}

fn is_compose_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| COMPOSE_FILES.contains(&n))
}

fn project_entry(dir: &Path) -> Option<ContainerInfo> {
    let dir_name = dir.file_name()?.to_string_lossy();
    match ContainerName::new(dir_name.as_ref()) {
        Ok(name) => Some(ContainerInfo::from_template(name, PathBuf::from(dir))),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Skipping template with unusable name");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ContainerState;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "services: {}\n").unwrap();
    }

    #[test]
    fn test_scan_finds_projects_by_directory_name() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("nginx/docker-compose.yml"));
        touch(&root.path().join("grafana/compose.yml"));
        touch(&root.path().join("apps/nested/docker-compose.yml"));
        touch(&root.path().join("notes/readme.md"));
        touch(&root.path().join("docker-compose.yml"));

        let map = scan_dir(root.path()).unwrap();
        let names: Vec<&str> = map.values().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["grafana", "nested", "nginx"]);

        let nginx = map.get(&ContainerName::new("nginx").unwrap()).unwrap();
        assert!(nginx.template_dir.as_ref().unwrap().is_absolute());
        assert!(nginx.template_dir.as_ref().unwrap().ends_with("nginx"));
        assert_eq!(nginx.state, ContainerState::NotInstalled);
    }

    #[test]
    fn test_scan_missing_dir_is_an_error() {
        let root = TempDir::new().unwrap();
        assert!(matches!(
            scan_dir(&root.path().join("absent")),
            Err(TemplateError::Io { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_does_not_follow_symlinked_dirs() {
        let root = TempDir::new().unwrap();
        touch(&root.path().join("nginx/docker-compose.yml"));
        touch(&root.path().join("grafana/compose.yml"));
        std::os::unix::fs::symlink(root.path(), root.path().join("grafana/back")).unwrap();

        let map = scan_dir(root.path()).unwrap();

        assert_eq!(map.len(), 2);
        let root = fs::canonicalize(root.path()).unwrap();
        let nginx = map.get(&ContainerName::new("nginx").unwrap()).unwrap();
        assert_eq!(nginx.template_dir.as_deref(), Some(root.join("nginx").as_path()));
        let grafana = map.get(&ContainerName::new("grafana").unwrap()).unwrap();
        assert_eq!(grafana.template_dir.as_deref(), Some(root.join("grafana").as_path()));
    }
}
