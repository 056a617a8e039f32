//! Native activity entry-point strategies.
//!
//! Java entry points are regenerated whole from a template carrying the
//! microphone permission handshake; Kotlin ones only get their package
//! declaration patched. The strategy is selected by detected file kind, not
//! by suffix checks at call sites.

use capdroid_core::error::Result;
use capdroid_core::patch::{apply_rules, replacement_literal, PatchRule};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Language of an activity entry point, detected from its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// Regenerated whole from [`main_activity_java`].
    Java,
    /// Only the package declaration line is patched.
    Kotlin,
}

impl ActivityKind {
    /// Detect the kind from a path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("java") => Some(Self::Java),
            Some("kt") => Some(Self::Kotlin),
            _ => None,
        }
    }

    /// Apply this strategy to `path`. Returns whether the file changed.
    pub fn apply(self, path: &Path, package_id: &str, enable_zoom: bool) -> Result<bool> {
        match self {
            Self::Java => {
                fs::write(path, main_activity_java(package_id, enable_zoom))?;
                Ok(true)
            }
            Self::Kotlin => {
                // Anchored to the declaration line only; `\s*;?` would eat
                // the trailing newline and glue the next line on.
                let rule = PatchRule::new(
                    r"^\s*package\s+[A-Za-z0-9_.]+[ \t]*;?",
                    replacement_literal(&format!("package {package_id}")),
                )?;
                apply_rules(path, &[rule])
            }
        }
    }
}

/// Every `MainActivity` source under the generated source root, sorted.
///
/// Prior regenerations can leave more than one behind (e.g. after a package
/// id change moved the canonical path), so all of them are returned.
#[must_use]
pub fn find_entry_points(java_src_root: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(java_src_root)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            matches!(
                entry.file_name().to_str(),
                Some("MainActivity.java" | "MainActivity.kt")
            )
        })
        .map(walkdir::DirEntry::into_path)
        .collect();
    found.sort();
    found
}

/// Render the Java activity hosting the web view.
///
/// The generated source installs a `WebChromeClient` that routes web-side
/// audio-capture permission prompts through the OS permission dialog: at
/// most one web request is pending at a time, and the OS result grants or
/// denies the stored request before clearing it.
#[must_use]
pub fn main_activity_java(package_id: &str, enable_zoom: bool) -> String {
    let zoom_import = if enable_zoom {
        "\nimport android.webkit.WebSettings;"
    } else {
        ""
    };
    let zoom_block = if enable_zoom {
        "\n            WebSettings settings = bridge.getWebView().getSettings();\n            settings.setSupportZoom(true);\n            settings.setBuiltInZoomControls(true);\n            settings.setDisplayZoomControls(false);\n"
    } else {
        ""
    };

    format!(
        r"package {package_id};

import android.Manifest;
import android.content.pm.PackageManager;
import android.os.Build;
import android.os.Bundle;
import android.webkit.PermissionRequest;
import android.webkit.WebChromeClient;{zoom_import}

import androidx.core.app.ActivityCompat;
import androidx.core.content.ContextCompat;

import com.getcapacitor.BridgeActivity;

public class MainActivity extends BridgeActivity {{
    private static final int REQ_RECORD_AUDIO = 2001;
    private PermissionRequest pendingAudioPermissionRequest = null;

    @Override
    public void onCreate(Bundle savedInstanceState) {{
        super.onCreate(savedInstanceState);

        if (bridge != null && bridge.getWebView() != null) {{
            bridge.getWebView().setWebChromeClient(new WebChromeClient() {{
                @Override
                public void onPermissionRequest(final PermissionRequest request) {{
                    runOnUiThread(() -> {{
                        handleWebPermissionRequest(request);
                    }});
                }}
            }});
{zoom_block}        }}

        ensureRecordAudioPermission();
    }}

    private void ensureRecordAudioPermission() {{
        if (Build.VERSION.SDK_INT < Build.VERSION_CODES.M) {{
            return;
        }}
        if (ContextCompat.checkSelfPermission(this, Manifest.permission.RECORD_AUDIO)
                != PackageManager.PERMISSION_GRANTED) {{
            ActivityCompat.requestPermissions(
                    this,
                    new String[]{{Manifest.permission.RECORD_AUDIO}},
                    REQ_RECORD_AUDIO
            );
        }}
    }}

    private void handleWebPermissionRequest(PermissionRequest request) {{
        if (request == null) {{
            return;
        }}

        boolean asksAudio = false;
        String[] resources = request.getResources();
        if (resources != null) {{
            for (String res : resources) {{
                if (PermissionRequest.RESOURCE_AUDIO_CAPTURE.equals(res)) {{
                    asksAudio = true;
                    break;
                }}
            }}
        }}

        if (!asksAudio) {{
            request.deny();
            return;
        }}

        if (Build.VERSION.SDK_INT >= Build.VERSION_CODES.M &&
                ContextCompat.checkSelfPermission(this, Manifest.permission.RECORD_AUDIO)
                        != PackageManager.PERMISSION_GRANTED) {{
            pendingAudioPermissionRequest = request;
            ActivityCompat.requestPermissions(
                    this,
                    new String[]{{Manifest.permission.RECORD_AUDIO}},
                    REQ_RECORD_AUDIO
            );
            return;
        }}

        request.grant(new String[]{{PermissionRequest.RESOURCE_AUDIO_CAPTURE}});
    }}

    @Override
    public void onRequestPermissionsResult(int requestCode, String[] permissions, int[] grantResults) {{
        super.onRequestPermissionsResult(requestCode, permissions, grantResults);
        if (requestCode != REQ_RECORD_AUDIO || pendingAudioPermissionRequest == null) {{
            return;
        }}

        boolean granted = grantResults != null
                && grantResults.length > 0
                && grantResults[0] == PackageManager.PERMISSION_GRANTED;

        if (granted) {{
            pendingAudioPermissionRequest.grant(new String[]{{PermissionRequest.RESOURCE_AUDIO_CAPTURE}});
        }} else {{
            pendingAudioPermissionRequest.deny();
        }}
        pendingAudioPermissionRequest = null;
    }}
}}
"
    )
}
