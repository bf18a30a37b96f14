//! WiX source templates.
//!
//! Element names, the `DirectoryRef` target and the component group name are
//! shared with the product definition compiled alongside the fragment.

/// Document envelope. `body` is empty when the app directory is not a directory.
pub const WIX_FRAGMENT_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Wix xmlns="http://schemas.microsoft.com/wix/2006/wi">
    <Fragment>
        {{body}}
    </Fragment>
</Wix>"#;

/// Directory tree and component group inside the fragment.
pub const WIX_FRAGMENT_BODY_TEMPLATE: &str = r#"<DirectoryRef Id="{{install_dir}}">
            {{directories}}
        </DirectoryRef>

        <ComponentGroup Id="{{component_group}}">
            {{components}}
        </ComponentGroup>"#;
