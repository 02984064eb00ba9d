//! Layered overlay of partial environment mappings.
//!
//! # Design
//! - The builder's override precedence (ambient < computed defaults <
//!   explicit overrides) is expressed as an ordered list of layers folded
//!   left-to-right, so the precedence is auditable and testable on its own.

use crate::model::EnvMap;

/// How a layer's entries interact with keys already present in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerPolicy {
    /// Layer entries replace existing values.
    Override,
    /// Layer entries only fill keys that are still absent.
    KeepExisting,
}

/// A partial mapping applied on top of the accumulated environment.
#[derive(Debug, Clone)]
pub struct EnvLayer {
    /// Conflict policy for this layer.
    pub policy: LayerPolicy,
    /// Entries in application order.
    pub entries: Vec<(String, String)>,
}

impl EnvLayer {
    /// Layer whose entries replace existing values.
    #[must_use]
    pub fn overriding<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_policy(LayerPolicy::Override, entries)
    }

    /// Layer whose entries only fill absent keys.
    #[must_use]
    pub fn keep_existing<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_policy(LayerPolicy::KeepExisting, entries)
    }

    fn with_policy<I, K, V>(policy: LayerPolicy, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            policy,
            entries: entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Fold `layers` left-to-right over `base` and return the merged mapping.
///
/// Later layers see the effect of earlier ones, so an `Override` layer
/// applied last wins over everything, including `KeepExisting` layers
/// that deferred to base values.
#[must_use]
pub fn overlay<I>(base: EnvMap, layers: I) -> EnvMap
where
    I: IntoIterator<Item = EnvLayer>,
{
    layers.into_iter().fold(base, |mut env, layer| {
        for (key, value) in layer.entries {
            match layer.policy {
                LayerPolicy::Override => {
                    env.insert(key, value);
                }
                LayerPolicy::KeepExisting => {
                    env.entry(key).or_insert(value);
                }
            }
        }
        env
    })
}
