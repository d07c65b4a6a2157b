use schemars::JsonSchema;
use serde::Deserialize;

use crate::params::ParamInput;

/// Arguments of every engine tool: one flexible parameter blob
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct KwargsParams {
    /// Tool parameters as a JSON object, JSON text, or space separated key=value pairs
    /// (for example `actor_label=Crate location=0,0,100 color=1,0,0`)
    #[serde(default)]
    pub kwargs: ParamInput,
}
