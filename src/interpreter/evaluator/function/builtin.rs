use crate::interpreter::{
    evaluator::function::{input, print, types},
    value::function::BuiltInFunction,
};

/// Defines the built-in functions as a static table.
///
/// Each entry provides:
/// - the name the function is bound to in the root context,
/// - its parameter names, whose count is the exact arity,
/// - the native implementation.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                params: [$($param:literal),* $(,)?],
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        /// Every built-in function, in installation order.
        pub static BUILTINS: &[BuiltInFunction] = &[
            $(
                BuiltInFunction { name: $name, params: &[$($param),*], func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "println"    => { params: ["value"], func: print::println },
    "print"      => { params: ["value"], func: print::print },
    "readLine"   => { params: [],        func: input::read_line },
    "clear"      => { params: [],        func: input::clear },
    "isNumber"   => { params: ["value"], func: types::is_number },
    "isString"   => { params: ["value"], func: types::is_string },
    "isList"     => { params: ["value"], func: types::is_list },
    "isFunction" => { params: ["value"], func: types::is_function },
}
