// Sales channel definitions from config/channels.yaml
//
//   channels:
//     - id: franchise_west
//       name: Franchise (West)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

/// Whole channels file; absent file means raw channel ids are displayed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelConfig {
    #[serde(default)]
    pub channels: Vec<Channel>,
}

impl ChannelConfig {
    /// Human label for a channel id, falling back to the raw id
    pub fn label<'a>(&'a self, channel_id: &'a str) -> &'a str {
        self.channels
            .iter()
            .find(|c| c.id == channel_id)
            .map(|c| c.name.as_str())
            .unwrap_or(channel_id)
    }
}
