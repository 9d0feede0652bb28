#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Two dark blocks on a light, slightly noisy background.
pub fn write_sample_png(path: &Path) {
    let image = image::RgbImage::from_fn(64, 24, |x, y| {
        let ink = (8..20).contains(&x) || (36..52).contains(&x);
        let noise = ((x * 7 + y * 3) % 5) as u8;
        if ink && (6..18).contains(&y) {
            image::Rgb([25 + noise, 30 + noise, 45 + noise])
        } else {
            image::Rgb([235 - noise, 230 - noise, 215 - noise])
        }
    });
    image.save(path).expect("save sample png");
}

/// Installs a shell script standing in for `tesseract`. It answers
/// `--list-langs` with `eng` and `osd`, checks the image argument, then runs
/// `body` with the usual positional arguments.
#[cfg(unix)]
pub fn fake_tesseract(dir: &Path, body: &str) -> PathBuf {
    fake_tesseract_listing(
        dir,
        r#"printf 'List of available languages in "/fake" (2):\neng\nosd\n'"#,
        body,
    )
}

/// Like [`fake_tesseract`], with `listing` run for `--list-langs`.
#[cfg(unix)]
pub fn fake_tesseract_listing(dir: &Path, listing: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-tesseract");
    let script = format!(
        "#!/bin/sh\n\
         if [ \"$1\" = \"--list-langs\" ]; then\n\
         {}\n\
         exit 0\n\
         fi\n\
         [ -s \"$1\" ] || {{ echo \"missing input image\" >&2; exit 3; }}\n\
         {}\n",
        listing, body
    );
    fs::write(&path, script).expect("write fake tesseract");
    let mut permissions = fs::metadata(&path).expect("metadata").permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).expect("chmod fake tesseract");
    path
}
