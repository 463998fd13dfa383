use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| {
            // Production deployments should restrict allowed origins
            true
        })
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        // Relaxed for local development, custom headers would fail preflight
        .allow_any_header()
        .max_age(3600)
}
