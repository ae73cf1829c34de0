//! Template rendering
//!
//! Renders HTML templates with tera. Every file in a template's directory is
//! loaded so the template can include or extend its siblings, and variables
//! the scenario does not supply are written back as literal placeholders.

mod placeholder;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tera::{Context, Template, Tera};

use crate::common::config::RenderConfig;
use crate::common::{Error, Result};

pub use placeholder::Unfilled;

/// Variables substituted into a template, keyed by name
pub type Variables = BTreeMap<String, serde_yaml::Value>;

/// Template formats the harness knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Html,
}

impl TemplateKind {
    /// Determine the template kind from a file suffix (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("html") {
            Some(Self::Html)
        } else {
            None
        }
    }
}

/// Render an HTML template and write the result to `output_path`
///
/// Parent directories of the output are created and an existing file is
/// overwritten.
pub fn render_html_template(
    template_path: &Path,
    variables: &Variables,
    output_path: &Path,
    options: RenderConfig,
) -> Result<()> {
    let rendered = render_to_string(template_path, variables, options)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::file_write(parent, &e))?;
    }
    std::fs::write(output_path, rendered).map_err(|e| Error::file_write(output_path, &e))?;

    tracing::debug!(output = %output_path.display(), "wrote rendered template");
    Ok(())
}

/// Render an HTML template to a string
pub fn render_to_string(
    template_path: &Path,
    variables: &Variables,
    options: RenderConfig,
) -> Result<String> {
    let name = template_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| Error::TemplateNotFound(template_path.to_path_buf()))?;

    let tera = load_templates(template_path, &name, options)?;
    let context = Context::from_serialize(variables).map_err(|e| {
        Error::render(&name, format!("invalid variables: {}", placeholder::describe(&e)))
    })?;

    tera.render(&name, &context)
        .map_err(|e| Error::render(&name, placeholder::describe(&e)))
}

/// Build a tera instance holding the template and every file beside it
///
/// Siblings are registered under their path relative to the template's
/// directory so they can be included or extended. Files that are not UTF-8
/// or do not parse are skipped; the template itself must do both.
fn load_templates(template_path: &Path, name: &str, options: RenderConfig) -> Result<Tera> {
    let dir = template_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let source =
        std::fs::read_to_string(template_path).map_err(|e| Error::file_read(template_path, &e))?;

    let mut templates = vec![(name.to_string(), placeholder::keep_unfilled(&source))];
    for (sibling, path) in sibling_files(dir, name)? {
        if sibling == name {
            continue;
        }
        let Ok(source) = std::fs::read_to_string(&path) else {
            tracing::debug!(path = %path.display(), "skipping non-UTF-8 file");
            continue;
        };
        let source = placeholder::keep_unfilled(&source);
        if let Err(e) = Template::new(&sibling, None, &source) {
            tracing::debug!(
                path = %path.display(),
                error = %placeholder::describe(&e),
                "skipping file that is not a valid template"
            );
            continue;
        }
        templates.push((sibling, source));
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(templates)
        .map_err(|e| Error::render(name, placeholder::describe(&e)))?;

    if options.autoescape {
        tera.autoescape_on(vec![".html", ".htm", ".HTML"]);
    } else {
        tera.autoescape_on(vec![]);
    }

    tracing::debug!(
        template = %template_path.display(),
        loaded = tera.get_template_names().count(),
        "loaded templates"
    );
    Ok(tera)
}

/// Regular files under `dir`, named by their `/`-separated relative path
fn sibling_files(dir: &Path, name: &str) -> Result<Vec<(String, PathBuf)>> {
    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy())).join("**/*");
    let entries = glob::glob(&pattern.to_string_lossy())
        .map_err(|e| Error::render(name, format!("invalid template directory: {}", e)))?;

    let mut files = Vec::new();
    for path in entries.flatten() {
        if !path.is_file() {
            continue;
        }
        let Ok(relative) = path.strip_prefix(dir) else {
            continue;
        };
        let relative_name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push((relative_name, path));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_yaml::Value::String(v.to_string())))
            .collect()
    }

    fn write_template(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_template_kind_is_case_insensitive() {
        assert_eq!(TemplateKind::from_path(Path::new("a.html")), Some(TemplateKind::Html));
        assert_eq!(TemplateKind::from_path(Path::new("a.HTML")), Some(TemplateKind::Html));
        assert_eq!(TemplateKind::from_path(Path::new("a.docx")), None);
        assert_eq!(TemplateKind::from_path(Path::new("html")), None);
    }

    #[test]
    fn test_substitutes_supplied_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "hello.html", "<p>Hello, {{ name }}!</p>\n");
        let out = render_to_string(&path, &vars(&[("name", "World")]), RenderConfig::default())
            .unwrap();
        assert_eq!(out, "<p>Hello, World!</p>\n");
    }

    #[test]
    fn test_missing_variables_stay_literal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(
            dir.path(),
            "letter.html",
            "Dear {{ name }}, re: {{name}} and {{ case_no | upper }}. {{ name }}",
        );
        let out = render_to_string(&path, &Variables::new(), RenderConfig::default()).unwrap();
        assert_eq!(out, "Dear {{ name }}, re: {{ name }} and {{ CASE_NO }}. {{ name }}");
    }

    #[test]
    fn test_partial_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "t.html", "{{ first }} {{ last }}");
        let out = render_to_string(&path, &vars(&[("last", "Lovelace")]), RenderConfig::default())
            .unwrap();
        assert_eq!(out, "{{ first }} Lovelace");
    }

    #[test]
    fn test_preserves_trailing_newline_and_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "u.html", "<h1>{{ title }}</h1>\n\n");
        let out = render_to_string(&path, &vars(&[("title", "Grüße, 日本")]), RenderConfig::default())
            .unwrap();
        assert_eq!(out, "<h1>Grüße, 日本</h1>\n\n");
    }

    #[test]
    fn test_values_are_not_escaped_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "e.html", "{{ body }}");
        let body = vars(&[("body", "<b>bold</b> & co")]);

        let raw = render_to_string(&path, &body, RenderConfig::default()).unwrap();
        assert_eq!(raw, "<b>bold</b> & co");

        let escaped = render_to_string(&path, &body, RenderConfig { autoescape: true }).unwrap();
        assert!(escaped.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_includes_sibling_templates() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "footer.html", "-- {{ signer }}");
        let path = write_template(dir.path(), "page.html", "body\n{% include \"footer.html\" %}");
        let out = render_to_string(&path, &vars(&[("signer", "Ada")]), RenderConfig::default())
            .unwrap();
        assert_eq!(out, "body\n-- Ada");
    }

    #[test]
    fn test_missing_loop_source_iterates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(
            dir.path(),
            "l.html",
            "a{% for s in services %}<li>{{ s }}</li>{% endfor %}b",
        );
        let out = render_to_string(&path, &Variables::new(), RenderConfig::default()).unwrap();
        assert_eq!(out, "ab");

        let variables: Variables = serde_yaml::from_str("services: [x, y]\n").unwrap();
        let out = render_to_string(&path, &variables, RenderConfig::default()).unwrap();
        assert_eq!(out, "a<li>x</li><li>y</li>b");
    }

    #[test]
    fn test_missing_variable_is_falsy_in_conditions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(
            dir.path(),
            "c.html",
            "{{ client }}|{% if client %}HAS{% else %}NONE{% endif %}",
        );
        let out = render_to_string(&path, &Variables::new(), RenderConfig::default()).unwrap();
        assert_eq!(out, "{{ client }}|NONE");

        let out = render_to_string(&path, &vars(&[("client", "Acme")]), RenderConfig::default())
            .unwrap();
        assert_eq!(out, "Acme|HAS");
    }

    #[test]
    fn test_default_filter_applies_to_missing_variable() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(
            dir.path(),
            "f.html",
            "{{ fee }}|{{ fee | default(value=\"TBD\") }}",
        );
        let out = render_to_string(&path, &Variables::new(), RenderConfig::default()).unwrap();
        assert_eq!(out, "{{ fee }}|TBD");
    }

    #[test]
    fn test_loop_variables_render_normally() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(
            dir.path(),
            "v.html",
            "{% for item in items %}[{{ item | upper }}]{% endfor %}{{ item }}",
        );
        let variables: Variables = serde_yaml::from_str("items: [a, b]\n").unwrap();
        let out = render_to_string(&path, &variables, RenderConfig::default()).unwrap();
        assert_eq!(out, "[A][B]{{ item }}");
    }

    #[test]
    fn test_includes_files_of_any_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("parts")).unwrap();
        write_template(dir.path(), "sig.txt", "-- {{ signer }}");
        write_template(dir.path(), "parts/style.css", "p { color: red; }");
        let path = write_template(
            dir.path(),
            "t.html",
            "{% include \"sig.txt\" %}\n<style>{% include \"parts/style.css\" %}</style>",
        );
        let out = render_to_string(&path, &Variables::new(), RenderConfig::default()).unwrap();
        assert_eq!(out, "-- {{ signer }}\n<style>p { color: red; }</style>");
    }

    #[test]
    fn test_unreadable_siblings_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), [0x89, b'P', b'N', b'G', 0xff, 0xfe]).unwrap();
        write_template(dir.path(), "broken.html", "{% if %}");
        let path = write_template(dir.path(), "ok.html", "fine {{ x }}");
        let out = render_to_string(&path, &vars(&[("x", "1")]), RenderConfig::default()).unwrap();
        assert_eq!(out, "fine 1");
    }

    #[test]
    fn test_template_syntax_error_is_a_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "bad.html", "{% for %}");
        let err = render_to_string(&path, &Variables::new(), RenderConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
        assert!(err.to_string().contains("bad.html"));
    }

    #[test]
    fn test_nested_and_list_variables() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(
            dir.path(),
            "n.html",
            "{{ client.name }}:{% for item in items %} {{ item }}{% endfor %}",
        );
        let variables: Variables =
            serde_yaml::from_str("client:\n  name: Acme\nitems: [a, b]\n").unwrap();
        let out = render_to_string(&path, &variables, RenderConfig::default()).unwrap();
        assert_eq!(out, "Acme: a b");
    }

    #[test]
    fn test_missing_attribute_root_is_a_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "d.html", "{{ user.name }}");
        let err = render_to_string(&path, &Variables::new(), RenderConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
    }

    #[test]
    fn test_rendering_is_deterministic_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "d.html", "{{ a }}-{{ b }}\n");
        let output = dir.path().join("out").join("nested").join("d.html");
        fs::create_dir_all(output.parent().unwrap()).unwrap();
        fs::write(&output, "stale content that is longer than the render").unwrap();

        let variables = vars(&[("a", "1")]);
        render_html_template(&path, &variables, &output, RenderConfig::default()).unwrap();
        let first = fs::read(&output).unwrap();
        render_html_template(&path, &variables, &output, RenderConfig::default()).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, b"1-{{ b }}\n");
    }

    #[test]
    fn test_creates_output_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_template(dir.path(), "p.html", "x");
        let output = dir.path().join("a").join("b").join("c.html");
        render_html_template(&path, &Variables::new(), &output, RenderConfig::default()).unwrap();
        assert!(output.exists());
    }
}
