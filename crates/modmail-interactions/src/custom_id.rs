// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Report configuration carried inside component custom IDs.
//!
//! The bot keeps no session store. Everything a report button needs (who to
//! ping, where to mirror, how many open reports a user may hold, the slow
//! mode) is serialized into the button's custom ID, echoed back by the
//! platform on every press, and re-encoded into the modal it opens.
//!
//! Format: `/<route>/<role>/<channel>/<max-active>/<slow-mode-seconds>`.
//! The field list is append-only. Identifiers minted before a field existed
//! simply stop early, and the missing fields decode to their defaults, so
//! every button ever posted keeps working.

use std::time::Duration;

use modmail_core::{ChannelId, FormatError, RoleId};

const DELIMITER: char = '/';

/// Field names in schema order. New fields are only ever appended.
pub const FIELDS: [&str; 4] = ["role", "channel", "max_active", "slow_mode"];

/// Which step of the report flow an identifier addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportRoute {
    /// The persistent button posted by `/create-report-button`.
    Button,
    /// The modal opened by that button.
    Modal,
}

impl ReportRoute {
    pub const ALL: [ReportRoute; 2] = [ReportRoute::Button, ReportRoute::Modal];

    /// Leading path segment of identifiers for this route.
    pub const fn prefix(self) -> &'static str {
        match self {
            ReportRoute::Button => "report-button",
            ReportRoute::Modal => "report-modal",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.prefix() == prefix)
    }

    /// Route patterns for every historical arity of this identifier,
    /// from the bare prefix up to the full field list.
    pub fn patterns(self) -> Vec<String> {
        (0..=FIELDS.len())
            .map(|arity| {
                let mut pattern = format!("{DELIMITER}{}", self.prefix());
                for field in &FIELDS[..arity] {
                    pattern.push(DELIMITER);
                    pattern.push('{');
                    pattern.push_str(field);
                    pattern.push('}');
                }
                pattern
            })
            .collect()
    }
}

/// Per-button report settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportConfig {
    /// Role mentioned in the announcement. Encoded as `0` when unset.
    pub role: Option<RoleId>,
    /// Staff channel that receives a mirror notice. Encoded as `0` when unset.
    pub channel: Option<ChannelId>,
    /// Open reports one user may hold under the channel; `0` means unlimited.
    pub max_active: u32,
    /// Per-user slow mode applied to new threads; zero disables it.
    /// Whole seconds only.
    pub slow_mode: Duration,
}

/// Serializes `config` into an identifier for `route`.
pub fn encode(route: ReportRoute, config: &ReportConfig) -> String {
    format!(
        "{d}{}{d}{}{d}{}{d}{}{d}{}",
        route.prefix(),
        config.role.map_or(0, RoleId::get),
        config.channel.map_or(0, ChannelId::get),
        config.max_active,
        config.slow_mode.as_secs(),
        d = DELIMITER,
    )
}

/// Parses an identifier produced by [`encode`], by this or any earlier
/// schema version.
pub fn decode(identifier: &str) -> Result<(ReportRoute, ReportConfig), FormatError> {
    let path = identifier.strip_prefix(DELIMITER).unwrap_or(identifier);
    let mut segments = path.split(DELIMITER);

    let prefix = segments.next().unwrap_or_default();
    let route = ReportRoute::from_prefix(prefix)
        .ok_or_else(|| FormatError::UnknownRoute(prefix.to_string()))?;

    let values: Vec<&str> = segments.collect();
    if values.len() > FIELDS.len() {
        return Err(FormatError::TooManyFields {
            found: values.len(),
            max: FIELDS.len(),
        });
    }

    let field = |index: usize| -> Result<u64, FormatError> {
        match values.get(index) {
            None => Ok(0),
            Some(raw) => raw.parse::<u64>().map_err(|_| FormatError::InvalidField {
                field: FIELDS[index],
                value: (*raw).to_string(),
            }),
        }
    };

    let max_active = field(2)?;
    let config = ReportConfig {
        role: non_zero(field(0)?).map(RoleId),
        channel: non_zero(field(1)?).map(ChannelId),
        max_active: u32::try_from(max_active).map_err(|_| FormatError::InvalidField {
            field: FIELDS[2],
            value: max_active.to_string(),
        })?,
        slow_mode: Duration::from_secs(field(3)?),
    };
    Ok((route, config))
}

fn non_zero(value: u64) -> Option<u64> {
    (value != 0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn full() -> ReportConfig {
        ReportConfig {
            role: Some(RoleId(1111)),
            channel: Some(ChannelId(2222)),
            max_active: 3,
            slow_mode: Duration::from_secs(90),
        }
    }

    #[test]
    fn encodes_all_fields_in_order() {
        assert_eq!(
            encode(ReportRoute::Button, &full()),
            "/report-button/1111/2222/3/90"
        );
    }

    #[test]
    fn unset_fields_encode_as_zero() {
        assert_eq!(
            encode(ReportRoute::Modal, &ReportConfig::default()),
            "/report-modal/0/0/0/0"
        );
    }

    #[test]
    fn decodes_legacy_role_only_identifier() {
        let (route, config) = decode("/report-button/1111").unwrap();
        assert_eq!(route, ReportRoute::Button);
        assert_eq!(
            config,
            ReportConfig {
                role: Some(RoleId(1111)),
                ..ReportConfig::default()
            }
        );
    }

    #[test]
    fn decodes_bare_prefix_to_defaults() {
        let (route, config) = decode("/report-modal").unwrap();
        assert_eq!(route, ReportRoute::Modal);
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn switching_route_keeps_fields() {
        let button = encode(ReportRoute::Button, &full());
        let (_, config) = decode(&button).unwrap();
        let modal = encode(ReportRoute::Modal, &config);
        assert_eq!(decode(&modal).unwrap(), (ReportRoute::Modal, full()));
    }

    #[test]
    fn non_numeric_field_is_format_error() {
        assert_eq!(
            decode("/report-button/abc/0/0/0").unwrap_err(),
            FormatError::InvalidField {
                field: "role",
                value: "abc".into()
            }
        );
        assert_eq!(
            decode("/report-button/0/0/-1").unwrap_err(),
            FormatError::InvalidField {
                field: "max_active",
                value: "-1".into()
            }
        );
    }

    #[test]
    fn empty_field_is_format_error() {
        assert!(matches!(
            decode("/report-button//5"),
            Err(FormatError::InvalidField { field: "role", .. })
        ));
    }

    #[test]
    fn oversized_max_active_is_format_error() {
        assert!(matches!(
            decode("/report-button/0/0/99999999999"),
            Err(FormatError::InvalidField {
                field: "max_active",
                ..
            })
        ));
    }

    #[test]
    fn unknown_route_is_format_error() {
        assert_eq!(
            decode("/ping").unwrap_err(),
            FormatError::UnknownRoute("ping".into())
        );
    }

    #[test]
    fn too_many_fields_is_format_error() {
        assert_eq!(
            decode("/report-button/1/2/3/4/5").unwrap_err(),
            FormatError::TooManyFields { found: 5, max: 4 }
        );
    }

    #[test]
    fn patterns_cover_every_arity() {
        assert_eq!(
            ReportRoute::Button.patterns(),
            vec![
                "/report-button",
                "/report-button/{role}",
                "/report-button/{role}/{channel}",
                "/report-button/{role}/{channel}/{max_active}",
                "/report-button/{role}/{channel}/{max_active}/{slow_mode}",
            ]
        );
    }

    fn any_config() -> impl Strategy<Value = ReportConfig> {
        (
            any::<u64>(),
            any::<u64>(),
            any::<u32>(),
            0u64..=MAX_SECS,
        )
            .prop_map(|(role, channel, max_active, secs)| ReportConfig {
                role: non_zero(role).map(RoleId),
                channel: non_zero(channel).map(ChannelId),
                max_active,
                slow_mode: Duration::from_secs(secs),
            })
    }

    const MAX_SECS: u64 = 6 * 60 * 60;

    proptest! {
        #[test]
        fn decode_inverts_encode(config in any_config(), modal in any::<bool>()) {
            let route = if modal { ReportRoute::Modal } else { ReportRoute::Button };
            prop_assert_eq!(decode(&encode(route, &config)).unwrap(), (route, config));
        }

        #[test]
        fn truncated_identifiers_default_missing_fields(config in any_config(), keep in 0usize..=4) {
            let encoded = encode(ReportRoute::Button, &config);
            let truncated: Vec<&str> = encoded.split('/').take(2 + keep).collect();
            let (_, decoded) = decode(&truncated.join("/")).unwrap();

            let expected = ReportConfig {
                role: if keep > 0 { config.role } else { None },
                channel: if keep > 1 { config.channel } else { None },
                max_active: if keep > 2 { config.max_active } else { 0 },
                slow_mode: if keep > 3 { config.slow_mode } else { Duration::ZERO },
            };
            prop_assert_eq!(decoded, expected);
        }

        #[test]
        fn decode_never_panics(input in "\\PC*") {
            let _ = decode(&input);
        }
    }
}
