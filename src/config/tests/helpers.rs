//! Layer composition shared by the configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::RepobridgeConfig;

/// Where a configuration layer comes from, lowest precedence first.
#[derive(Debug, Clone, Copy)]
pub enum Source {
    Defaults,
    File,
    Environment,
    Cli,
}

/// Merges `(source, values)` layers in order into a [`RepobridgeConfig`].
pub fn compose(layers: &[(Source, Value)]) -> RepobridgeConfig {
    let mut composer = MergeComposer::new();
    for (source, values) in layers.iter().cloned() {
        match source {
            Source::Defaults => composer.push_defaults(values),
            Source::File => composer.push_file(values, None),
            Source::Environment => composer.push_environment(values),
            Source::Cli => composer.push_cli(values),
        }
    }
    RepobridgeConfig::merge_from_layers(composer.layers()).expect("layers should merge")
}
