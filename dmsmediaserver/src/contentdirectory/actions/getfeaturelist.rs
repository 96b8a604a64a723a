use crate::contentdirectory::FEATURE_LIST;
use crate::contentdirectory::response::Headers;

define_action! {
    pub static X_GETFEATURELIST = "X_GetFeatureList" as GetFeatureList {
        out "FeatureList",
    }
}

define_action! {
    pub static GETFEATURELIST = "GetFeatureList" as GetFeatureList {
        out "FeatureList",
    }
}

pub(crate) fn execute() -> Headers {
    vec![("FeatureList".to_string(), FEATURE_LIST.to_string())]
}
