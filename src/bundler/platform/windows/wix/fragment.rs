//! WiX fragment generation for an application directory.
//!
//! Two walks over the same [`DirNode`] tree: one nests `<Directory>` elements
//! the way the directories nest on disk, the other emits one flat
//! `<Component>` per directory listing that directory's files. Files are
//! read from disk during the second walk, not taken from the tree.

use super::{
    guid::{GuidSource, format_guid},
    id::{DirectoryIds, INSTALL_DIR_ID, generate_id},
    scan::{DirNode, collect_dirs},
    template::{WIX_FRAGMENT_BODY_TEMPLATE, WIX_FRAGMENT_TEMPLATE},
};
use crate::bundler::{
    error::{Context, ErrorExt, Result},
    settings::Arch,
};
use handlebars::Handlebars;
use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt::Write as _,
    path::{Path, PathBuf},
};

/// Name of the component group holding every generated component.
pub const COMPONENT_GROUP_ID: &str = "ApplicationFiles";

/// One indentation level.
pub const TABULATION: &str = "    ";

/// Generates the WiX fragment describing `app_dir`.
///
/// `main_exe_file_name` is left out of every component; the product
/// definition references it separately.
pub fn generate_fragment(
    app_dir: &Path,
    main_exe_file_name: &str,
    arch: Arch,
    guids: &dyn GuidSource,
) -> Result<String> {
    let tree = collect_dirs(app_dir, "")?;
    render_fragment(tree.as_ref(), main_exe_file_name, arch, guids)
}

/// Renders the fragment for an already scanned tree.
pub fn render_fragment(
    tree: Option<&DirNode>,
    main_exe_file_name: &str,
    arch: Arch,
    guids: &dyn GuidSource,
) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.register_template_string("fragment", WIX_FRAGMENT_TEMPLATE)?;
    handlebars.register_template_string("body", WIX_FRAGMENT_BODY_TEMPLATE)?;

    let body = match tree {
        Some(root) => {
            let current = TABULATION.repeat(3);
            let directories = format_directories(&root.children, &current, TABULATION);
            let components = format_components(
                std::slice::from_ref(root),
                Some(INSTALL_DIR_ID),
                main_exe_file_name,
                arch,
                &current,
                TABULATION,
                guids,
            )?;

            let mut data = BTreeMap::new();
            data.insert("install_dir", INSTALL_DIR_ID.to_string());
            data.insert("component_group", COMPONENT_GROUP_ID.to_string());
            data.insert("directories", directories.trim().to_string());
            data.insert("components", components.trim().to_string());
            handlebars.render("body", &data)?
        }
        None => String::new(),
    };

    let mut data = BTreeMap::new();
    data.insert("body", body);
    Ok(handlebars.render("fragment", &data)?)
}

/// Emits nested `<Directory>` elements mirroring `directories`.
pub fn format_directories(directories: &[DirNode], current: &str, tabulation: &str) -> String {
    let mut result = String::new();

    for dir in directories {
        let directory_id = generate_id(&dir.path);
        let sub_dirs = format_directories(
            &dir.children,
            &format!("{current}{tabulation}"),
            tabulation,
        );

        let _ = write!(
            result,
            "{current}<Directory Id=\"{directory_id}\" Name=\"{}\"",
            escape_attr(&dir.name)
        );
        if sub_dirs.is_empty() {
            result.push_str("/>\n");
        } else {
            let _ = write!(result, ">\n{sub_dirs}{current}</Directory>\n");
        }
    }

    result
}

/// Emits one `<Component>` per directory, parents before children.
///
/// Components never nest. `preset_directory_id` replaces the derived id of
/// the directories passed at this level (used for the install root).
pub fn format_components(
    directories: &[DirNode],
    preset_directory_id: Option<&str>,
    main_exe_file_name: &str,
    arch: Arch,
    current: &str,
    tabulation: &str,
    guids: &dyn GuidSource,
) -> Result<String> {
    let mut result = String::new();
    let is_win64 = if arch.is_win64() { "yes" } else { "no" };

    for dir in directories {
        let ids = DirectoryIds::for_path(&dir.path, preset_directory_id);
        let component_guid = format_guid(guids.next_guid());

        let _ = writeln!(
            result,
            "{current}<Component Id=\"{}\" Guid=\"{component_guid}\" Directory=\"{}\" DiskId=\"1\" KeyPath=\"yes\" Win64=\"{is_win64}\">",
            ids.component, ids.directory
        );

        for (name, path) in list_files(&dir.path, main_exe_file_name)? {
            let _ = writeln!(
                result,
                "{current}{tabulation}<File Id=\"{}\" Name=\"{}\" Vital=\"yes\" Source=\"{}\"/>",
                generate_id(&path),
                escape_attr(&name),
                escape_attr(&path.display().to_string())
            );
        }

        let _ = write!(
            result,
            "\n{current}{tabulation}<RemoveFolder Id=\"{}\" Directory=\"{}\" On=\"uninstall\"/>\n",
            ids.uninstall, ids.directory
        );
        let _ = write!(result, "{current}</Component>\n\n");

        result.push_str(&format_components(
            &dir.children,
            None,
            main_exe_file_name,
            arch,
            current,
            tabulation,
            guids,
        )?);
    }

    Ok(result)
}

/// Lists the regular files of `dir`, sorted by name, without the main executable.
fn list_files(dir: &Path, main_exe_file_name: &str) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = std::fs::read_dir(dir)
        .fs_context("listing directory", dir)?
        .collect::<std::io::Result<Vec<_>>>()
        .fs_context("listing directory", dir)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut files = Vec::new();
    for entry in entries {
        let item_path = entry.path();
        let name = entry
            .file_name()
            .to_str()
            .with_context(|| format!("file name is not valid UTF-8: {}", item_path.display()))?
            .to_string();

        if name == main_exe_file_name {
            continue;
        }

        let metadata =
            std::fs::metadata(&item_path).fs_context("reading file metadata", &item_path)?;
        if metadata.is_file() {
            files.push((name, item_path));
        }
    }

    Ok(files)
}

fn escape_attr(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
