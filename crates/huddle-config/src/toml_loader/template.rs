//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Huddle Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[media]
# app_id = ""               # application id issued by the media provider
# token = "..."             # omit to join without a token

[media.encoder]
# width = 1280              # 160-3840
# height = 720              # 120-2160
# frame_rate = 30           # 1-60
# bitrate_min_kbps = 600
# bitrate_max_kbps = 1500   # must be >= bitrate_min_kbps

[chat]
# system_author = "🤖"      # author shown on welcome/joined/left notices

[logging]
# level = "info"            # trace, debug, info, warn, error
"##
    .to_string()
}
