use crate::{
    api::{admin, attendance},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    cfg.service(
        web::scope(&config.api_prefix)
            // Kiosk routes, open to every device on the floor
            .service(
                web::scope("/attendance")
                    .service(
                        web::resource("")
                            .wrap(build_limiter(config.rate_submit_per_min))
                            .route(web::post().to(attendance::submit)),
                    )
                    .service(web::resource("/today").route(web::get().to(attendance::today)))
                    .service(
                        web::resource("/today/live").route(web::get().to(attendance::today_live)),
                    )
                    .service(web::resource("/windows").route(web::get().to(attendance::windows))),
            )
            // Admin routes; each handler checks the shared secret itself
            .service(
                web::scope("/admin")
                    .wrap(build_limiter(config.rate_admin_per_min))
                    .service(web::resource("/login").route(web::post().to(admin::login)))
                    .service(web::resource("/records").route(web::get().to(admin::records)))
                    .service(
                        web::resource("/records/live").route(web::get().to(admin::records_live)),
                    )
                    .service(web::resource("/stats").route(web::get().to(admin::stats)))
                    .service(web::resource("/export").route(web::get().to(admin::export_xlsx)))
                    .service(
                        web::resource("/export/range").route(web::get().to(admin::export_range)),
                    )
                    .service(
                        web::resource("/export/auto").route(web::post().to(admin::export_auto)),
                    ),
            ),
    );
}
