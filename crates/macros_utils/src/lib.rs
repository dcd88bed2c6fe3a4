//! Small declarative helpers shared by the HTTP apps.

/// Generates a `pub fn routes(cfg: &mut ServiceConfig)` for a module.
///
/// - `route handler` registers an actix service (a `#[get]`-style handler)
/// - `configure module::routes` merges another module's routes in place
/// - `scope "/prefix" => module::routes` mounts them under a path prefix
///
/// ```ignore
/// macros_utils::routes! {
///     route health_route,
///     scope "/api" => api::routes,
/// }
/// ```
#[cfg(feature = "actix")]
#[macro_export]
macro_rules! routes {
    (@entry $cfg:ident, route $target:path) => {
        $cfg.service($target);
    };
    (@entry $cfg:ident, configure $target:path) => {
        $cfg.configure($target);
    };
    (@entry $cfg:ident, scope $path:literal => $target:path) => {
        $cfg.service($crate::actix_web::web::scope($path).configure($target));
    };
    ($($kind:ident $($path:literal =>)? $target:path),* $(,)?) => {
        pub fn routes(cfg: &mut $crate::actix_web::web::ServiceConfig) {
            $( $crate::routes!(@entry cfg, $kind $($path =>)? $target); )*
        }
    };
}

#[cfg(feature = "actix")]
#[doc(hidden)]
pub use actix_web;
