//! Validation for the `[media.encoder]` section.

use crate::schema::HuddleConfig;

use super::helpers::check_range;

pub(crate) fn validate_encoder(errors: &mut Vec<String>, config: &HuddleConfig) {
    let encoder = &config.media.encoder;
    check_range(errors, "media.encoder.width", encoder.width, 160..=3840);
    check_range(errors, "media.encoder.height", encoder.height, 120..=2160);
    check_range(errors, "media.encoder.frame_rate", encoder.frame_rate, 1..=60);

    if encoder.bitrate_min_kbps == 0 {
        errors.push("media.encoder.bitrate_min_kbps must be greater than 0".into());
    }
    if encoder.bitrate_min_kbps > encoder.bitrate_max_kbps {
        errors.push(format!(
            "media.encoder.bitrate_min_kbps ({}) exceeds bitrate_max_kbps ({})",
            encoder.bitrate_min_kbps, encoder.bitrate_max_kbps
        ));
    }
}
