use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};
use tracing::debug;

use super::{INCLUDES_FILE, TemplateError, VALUES_FILE};

const TEMPLATE_NAME: &str = "template";

/// Older templates address values through `.Values.`; values are the
/// whole render context here, so the prefix is dropped.
fn strip_values_prefix(template: &str) -> String {
    template.replace(".Values.", "")
}

/// Render one compose template into `output_path`.
///
/// Values are read from `values.toml` in the templates root, which is the
/// template's grandparent directory. An `includes.template` next to it is
/// available to `{% include "includes.template" %}`.
pub fn render_file(template_path: &Path, output_path: &Path) -> Result<(), TemplateError> {
    let template = fs::read_to_string(template_path).map_err(TemplateError::io(template_path))?;

    let templates_root = template_path
        .parent()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));

    let context = load_values(&templates_root.join(VALUES_FILE))?;

    let render_err = |source| TemplateError::Render {
        path: template_path.to_path_buf(),
        source,
    };

    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);

    let includes_path = templates_root.join(INCLUDES_FILE);
    if includes_path.is_file() {
        let includes = fs::read_to_string(&includes_path).map_err(TemplateError::io(&includes_path))?;
        tera.add_raw_template(INCLUDES_FILE, &strip_values_prefix(&includes))
            .map_err(render_err)?;
    }

    tera.add_raw_template(TEMPLATE_NAME, &strip_values_prefix(&template))
        .map_err(render_err)?;
    let output = tera.render(TEMPLATE_NAME, &context).map_err(render_err)?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent).map_err(TemplateError::io(parent))?;
    }
    fs::write(output_path, output).map_err(TemplateError::io(output_path))?;

    debug!(
        template = %template_path.display(),
        output = %output_path.display(),
        "Rendered template"
    );
    Ok(())
}

fn load_values(path: &Path) -> Result<Context, TemplateError> {
    let content = fs::read_to_string(path).map_err(TemplateError::io(path))?;
    let values: toml::Table = toml::from_str(&content).map_err(|source| TemplateError::Values {
        path: path.to_path_buf(),
        source,
    })?;
    Context::from_serialize(values).map_err(|source| TemplateError::Render {
        path: path.to_path_buf(),
        source,
    })
}

/// Render every template below `templates_dir` into `output_dir`,
/// keeping relative paths. YAML files other than the values file are
/// rendered; all other files are copied as-is.
pub fn render_dir(templates_dir: &Path, output_dir: &Path) -> Result<(), TemplateError> {
    let meta = fs::metadata(templates_dir).map_err(TemplateError::io(templates_dir))?;
    if !meta.is_dir() {
        return Err(TemplateError::NotADirectory(templates_dir.to_path_buf()));
    }

    for path in walk_files(templates_dir)? {
        let relative = path.strip_prefix(templates_dir).unwrap_or(&path);
        let output_path = output_dir.join(relative);

        if is_template(&path) {
            render_file(&path, &output_path)?;
        } else {
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent).map_err(TemplateError::io(parent))?;
            }
            fs::copy(&path, &output_path).map_err(TemplateError::io(&path))?;
        }
    }

    Ok(())
}

fn is_template(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name != VALUES_FILE && (name.ends_with(".yml") || name.ends_with(".yaml"))
}

fn walk_files(root: &Path) -> Result<Vec<PathBuf>, TemplateError> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).map_err(TemplateError::io(&dir))? {
            let entry = entry.map_err(TemplateError::io(&dir))?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(TemplateError::io(&path))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_symlink() && path.is_dir() {
                debug!(path = %path.display(), "Skipping symlinked directory");
            } else {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}
