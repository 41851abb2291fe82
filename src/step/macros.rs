//! Macro utilitaria para reducir boilerplate al declarar Steps.
//!
//! Exportada en la raíz del crate para poder usarla como:
//!   use pipelab::pipeline_step;
//!
//! Formas soportadas (el `name:` es opcional; por defecto se usa el nombre
//! del tipo):
//! - pipeline_step!(step Name { params { a, b = default_expr }, execute(s, pipe, args) {...} });
//! - pipeline_step!(step Name { fields { f: Ty }, params {...}, execute(...) {...} });
//! - ambas admiten un bloque final `, inverse(s, pipe, kwargs) {...}`
//!
//! En `params`, un nombre pelado declara un parámetro requerido y
//! `nombre = expr` uno opcional con ese default. La variante con `fields`
//! deriva `serde::Serialize` y usa los campos como snapshot de
//! configuración, así que el crate usuario necesita `serde` y `serde_json`.

#[macro_export]
macro_rules! pipeline_step {
    // ---------------- helpers internos ----------------
    (@step_name $id:expr ; $tyname:ident) => { $id };
    (@step_name ; $tyname:ident) => { stringify!($tyname) };

    (@param $pname:ident) => {
        $crate::model::ParamSpec::required(stringify!($pname))
    };
    (@param $pname:ident = $pdef:expr) => {
        $crate::model::ParamSpec::optional(stringify!($pname), $pdef)
    };

    // ---------------- Step con fields e inversa ----------------
    (
        step $name:ident {
            $( name: $id:expr, )?
            fields { $($fname:ident : $fty:ty),+ $(,)? },
            params { $( $pname:ident $( = $pdef:expr )? ),* $(,)? },
            execute($self_ident:ident, $pipe_ident:ident, $args_ident:ident) $body:block
            , inverse($iself_ident:ident, $ipipe_ident:ident, $ikw_ident:ident) $ibody:block
        }
    ) => {
        #[derive(Clone, Debug, serde::Serialize)]
        pub struct $name { $(pub $fname: $fty),+ }
        impl $name { pub fn new($($fname : $fty),+) -> Self { Self { $($fname),+ } } }
        impl $crate::step::Step for $name {
            fn name(&self) -> &str { $crate::pipeline_step!(@step_name $($id)? ; $name) }
            fn params(&self) -> Vec<$crate::model::ParamSpec> {
                vec![ $( $crate::pipeline_step!(@param $pname $( = $pdef )?) ),* ]
            }
            fn config(&self) -> Result<serde_json::Value, $crate::errors::PipelineError> {
                serde_json::to_value(self)
                    .map_err(|e| $crate::errors::PipelineError::Serialization(e.to_string()))
            }
            fn execute(&self,
                       $pipe_ident: &mut $crate::pipeline::Pipeline,
                       $args_ident: &$crate::model::BoundArgs)
                       -> Result<$crate::model::StepOutputs, $crate::errors::PipelineError> {
                let $self_ident = self;
                $body
            }
            fn execute_inverse(&self,
                               $ipipe_ident: &mut $crate::pipeline::Pipeline,
                               $ikw_ident: $crate::model::StepOutputs)
                               -> Result<$crate::model::StepOutputs, $crate::errors::PipelineError> {
                let $iself_ident = self;
                $ibody
            }
        }
    };

    // ---------------- Step con fields ----------------
    (
        step $name:ident {
            $( name: $id:expr, )?
            fields { $($fname:ident : $fty:ty),+ $(,)? },
            params { $( $pname:ident $( = $pdef:expr )? ),* $(,)? },
            execute($self_ident:ident, $pipe_ident:ident, $args_ident:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug, serde::Serialize)]
        pub struct $name { $(pub $fname: $fty),+ }
        impl $name { pub fn new($($fname : $fty),+) -> Self { Self { $($fname),+ } } }
        impl $crate::step::Step for $name {
            fn name(&self) -> &str { $crate::pipeline_step!(@step_name $($id)? ; $name) }
            fn params(&self) -> Vec<$crate::model::ParamSpec> {
                vec![ $( $crate::pipeline_step!(@param $pname $( = $pdef )?) ),* ]
            }
            fn config(&self) -> Result<serde_json::Value, $crate::errors::PipelineError> {
                serde_json::to_value(self)
                    .map_err(|e| $crate::errors::PipelineError::Serialization(e.to_string()))
            }
            fn execute(&self,
                       $pipe_ident: &mut $crate::pipeline::Pipeline,
                       $args_ident: &$crate::model::BoundArgs)
                       -> Result<$crate::model::StepOutputs, $crate::errors::PipelineError> {
                let $self_ident = self;
                $body
            }
        }
    };

    // ---------------- Step unit (sin fields) e inversa ----------------
    (
        step $name:ident {
            $( name: $id:expr, )?
            params { $( $pname:ident $( = $pdef:expr )? ),* $(,)? },
            execute($self_ident:ident, $pipe_ident:ident, $args_ident:ident) $body:block
            , inverse($iself_ident:ident, $ipipe_ident:ident, $ikw_ident:ident) $ibody:block
        }
    ) => {
        #[derive(Clone, Debug)]
        pub struct $name;
        impl $name { pub fn new() -> Self { Self } }
        impl $crate::step::Step for $name {
            fn name(&self) -> &str { $crate::pipeline_step!(@step_name $($id)? ; $name) }
            fn params(&self) -> Vec<$crate::model::ParamSpec> {
                vec![ $( $crate::pipeline_step!(@param $pname $( = $pdef )?) ),* ]
            }
            fn execute(&self,
                       $pipe_ident: &mut $crate::pipeline::Pipeline,
                       $args_ident: &$crate::model::BoundArgs)
                       -> Result<$crate::model::StepOutputs, $crate::errors::PipelineError> {
                let $self_ident = self;
                $body
            }
            fn execute_inverse(&self,
                               $ipipe_ident: &mut $crate::pipeline::Pipeline,
                               $ikw_ident: $crate::model::StepOutputs)
                               -> Result<$crate::model::StepOutputs, $crate::errors::PipelineError> {
                let $iself_ident = self;
                $ibody
            }
        }
    };

    // ---------------- Step unit (sin fields) ----------------
    (
        step $name:ident {
            $( name: $id:expr, )?
            params { $( $pname:ident $( = $pdef:expr )? ),* $(,)? },
            execute($self_ident:ident, $pipe_ident:ident, $args_ident:ident) $body:block
        }
    ) => {
        #[derive(Clone, Debug)]
        pub struct $name;
        impl $name { pub fn new() -> Self { Self } }
        impl $crate::step::Step for $name {
            fn name(&self) -> &str { $crate::pipeline_step!(@step_name $($id)? ; $name) }
            fn params(&self) -> Vec<$crate::model::ParamSpec> {
                vec![ $( $crate::pipeline_step!(@param $pname $( = $pdef )?) ),* ]
            }
            fn execute(&self,
                       $pipe_ident: &mut $crate::pipeline::Pipeline,
                       $args_ident: &$crate::model::BoundArgs)
                       -> Result<$crate::model::StepOutputs, $crate::errors::PipelineError> {
                let $self_ident = self;
                $body
            }
        }
    };
}
