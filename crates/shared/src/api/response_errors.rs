use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::error::{ServerError, ValidationError};

macro_rules! response_error {
    ($name:ident {
        $(
            #[code($variant_code:expr)]
            $variant:ident
            $({ $($var_struct_body_tt:tt)* })?
        ,)*
    }) => {

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
        pub enum $name {
            $(
                #[error("{}::{}: {:?}", stringify!($name), stringify!($variant), self)]
                $variant $({
                    $($var_struct_body_tt)*
                })?,
            )*
        }

        impl From<$name> for ServerError<$name> {
            fn from(inner: $name) -> Self {
                let code = match &inner {
                    $( $name::$variant { .. } => $variant_code, )*
                };
                Self::Inner { code, inner }
            }
        }

        impl From<ValidationError> for ServerError<$name> {
            fn from(err: ValidationError) -> Self {
                $name::Invalid { error_messages: err.error_messages }.into()
            }
        }
    };
}

response_error!(PlanError {
    #[code(StatusCode::BAD_REQUEST)]
    Invalid { error_messages: Vec<String> },
    #[code(StatusCode::NOT_FOUND)]
    NotFound { id: String },
});

response_error!(ExerciseError {
    #[code(StatusCode::BAD_REQUEST)]
    Invalid { error_messages: Vec<String> },
    #[code(StatusCode::NOT_FOUND)]
    PlanNotFound { plan_id: String },
    #[code(StatusCode::NOT_FOUND)]
    NotFound { id: String },
});
