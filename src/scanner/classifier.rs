//! Video file classification by extension.
//!
//! # Overview
//!
//! A file counts as a video when its final extension, lowercased, is one of
//! [`VIDEO_EXTENSIONS`]. Nothing is read from disk; the check is purely
//! lexical so it can run on names coming from any source.
//!
//! # Example
//!
//! ```
//! use mediadupe::scanner::classifier::is_video_file;
//! use std::path::Path;
//!
//! assert!(is_video_file(Path::new("Movie (2010).MKV")));
//! assert!(!is_video_file(Path::new("Movie (2010).srt")));
//! ```

use std::path::Path;

/// Recognised video extensions, lowercase and without the leading dot.
#[rustfmt::skip]
pub const VIDEO_EXTENSIONS: &[&str] = &[
    // MPEG
    "mp4", "m4v", "mpg", "mpeg", "m1v", "m2v", "mpv", "mpv2", "mp4v",
    // AVI and DivX
    "avi", "divx", "xvid",
    // Matroska
    "mkv", "mk3d", "mka",
    // QuickTime
    "mov", "qt",
    // Windows Media
    "wmv", "wmvhd", "asf",
    // Flash
    "flv", "f4v", "swf",
    // Web
    "webm", "ogv", "ogm",
    // RealMedia
    "rm", "rmvb", "ra", "ram", "rv",
    // Transport streams
    "ts", "m2ts", "mts", "trp", "tp",
    // Raw video
    "yuv", "y4m", "raw", "ycbcr", "rgb", "rgba",
    // Containers
    "nut",
    // Disc formats
    "vob", "vro", "dat", "bik", "smk",
    // Recordings
    "dvr-ms", "wtv", "pvr",
    // Mobile
    "3gp", "3g2", "amv", "dmv",
    // Elementary streams
    "h264", "h265", "hevc", "264", "265", "avc", "vc1", "vp8", "vp9", "av1",
    // Broadcast
    "mxf", "wv",
    // Miscellaneous
    "nsv", "roq", "svi", "uvu", "viv", "xesc", "gifv",
];

/// Check whether an extension (without the dot, any case) is a video extension.
#[must_use]
pub fn is_video_extension(extension: &str) -> bool {
    let lower = extension.to_lowercase();
    VIDEO_EXTENSIONS.contains(&lower.as_str())
}

/// Check whether a file name or path refers to a video file.
///
/// Returns `false` for names without an extension, including dot-files
/// such as `.mkv`.
#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(is_video_extension)
}
