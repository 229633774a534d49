use crate::errors::Error;
use core::fmt::Display;
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// A setting value. Encoded as text with a one letter type prefix:
///
/// ```text
/// u:64
/// s:catmullrom
/// b:false
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Setting {
    UInt(usize),
    String(String),
    Bool(bool),
}

impl Setting {
    /// Type prefix used in the encoded form
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UInt(_) => "u",
            Self::String(_) => "s",
            Self::Bool(_) => "b",
        }
    }

    #[must_use]
    pub fn to_bool(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::UInt(value) => {
                warn!("setting {value} read as boolean");
                *value != 0
            }
            Self::String(value) => {
                warn!("setting '{value}' read as boolean");
                matches!(
                    value.to_ascii_lowercase().as_str(),
                    "yes" | "on" | "true" | "1"
                )
            }
        }
    }

    /// Strings that do not hold a number read as 0
    #[must_use]
    pub fn to_uint(&self) -> usize {
        match self {
            Self::UInt(value) => *value,
            Self::Bool(value) => {
                warn!("setting {value} read as number");
                usize::from(*value)
            }
            Self::String(value) => {
                warn!("setting '{value}' read as number");
                value.trim().parse().unwrap_or(0)
            }
        }
    }

    /// The value without its type prefix
    #[must_use]
    pub fn to_text(&self) -> String {
        if !matches!(self, Self::String(_)) {
            warn!("setting {self} read as string");
        }
        self.to_string()
    }

    /// The encoded form as accepted by `from_str`
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}:{self}", self.kind())
    }
}

impl Display for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UInt(value) => write!(f, "{value}"),
            Self::String(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl FromStr for Setting {
    type Err = Error;

    fn from_str(encoded: &str) -> Result<Self, Error> {
        let Some((kind, value)) = encoded.split_once(':') else {
            return Err(Error::Config(format!("missing type prefix: {encoded}")));
        };

        let invalid =
            |err: &dyn Display| Error::Config(format!("invalid {kind} setting {value}: {err}"));
        match kind {
            "u" => value.parse().map(Self::UInt).map_err(|err| invalid(&err)),
            "b" => value.parse().map(Self::Bool).map_err(|err| invalid(&err)),
            "s" => Ok(Self::String(value.to_string())),
            _ => Err(Error::Config(format!("unknown setting type: {kind}"))),
        }
    }
}

impl Serialize for Setting {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Setting {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::from_str(&value).map_err(serde::de::Error::custom)
    }
}

/// Description and default of a known setting
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SettingInfo {
    /// Dotted key, ie: convert.max_dim
    pub key: String,
    pub description: String,
    pub default: Setting,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode() {
        assert_eq!(Setting::from_str("u:64").unwrap(), Setting::UInt(64));
        assert_eq!(Setting::from_str("b:true").unwrap(), Setting::Bool(true));
        assert_eq!(
            Setting::from_str("s:catmullrom").unwrap(),
            Setting::String("catmullrom".into())
        );
        assert_eq!(
            Setting::from_str("s:a:b").unwrap(),
            Setting::String("a:b".into())
        );
    }

    #[test]
    fn encode() {
        for encoded in ["u:64", "b:false", "s:nearest", "s:"] {
            assert_eq!(Setting::from_str(encoded).unwrap().encode(), encoded);
        }
        assert_eq!(Setting::UInt(7).kind(), "u");
    }

    #[test]
    fn conversions() {
        let s = Setting::UInt(64);
        assert_eq!(s.to_uint(), 64);
        assert!(s.to_bool());
        assert_eq!(s.to_text(), "64");

        let s = Setting::Bool(false);
        assert!(!s.to_bool());
        assert_eq!(s.to_uint(), 0);

        let s = Setting::String("32".into());
        assert_eq!(s.to_uint(), 32);
        assert_eq!(s.to_text(), "32");

        assert!(Setting::String("On".into()).to_bool());
        assert!(!Setting::String("off".into()).to_bool());
        assert_eq!(Setting::String("lots".into()).to_uint(), 0);
    }

    #[test]
    fn invalid_settings() {
        for encoded in ["i:-1", "m:a,b", "b:maybe", "u:-1", "u:", "no prefix"] {
            assert!(
                matches!(Setting::from_str(encoded), Err(Error::Config(_))),
                "{encoded} should not decode"
            );
        }
    }

    #[test]
    fn serde_roundtrip() {
        let json = serde_json::to_string(&Setting::UInt(12)).unwrap();
        assert_eq!(json, r#""u:12""#);
        let setting: Setting = serde_json::from_str(&json).unwrap();
        assert_eq!(setting, Setting::UInt(12));
        assert!(serde_json::from_str::<Setting>(r#""i:3""#).is_err());
    }
}
