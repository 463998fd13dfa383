use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local;
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use causelotto_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    events::EventBroadcaster,
    handlers,
    middlewares::create_cors,
    services::{BeneficiaryService, BetService, DrawService, UserService},
    swagger::swagger_config,
    tasks,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // Load and validate configuration (share percentages, number range)
    let config = Config::from_toml().expect("Failed to load configuration file");

    // Database pool and schema
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // One broadcaster per process, injected into publishers and the stream
    // gateway; push events do not cross server instances
    let broadcaster = EventBroadcaster::new(config.stream.channel_capacity);

    let bet_service = BetService::new(pool.clone(), config.lottery.clone(), broadcaster.clone());
    let draw_service = DrawService::new(pool.clone(), config.lottery.clone(), broadcaster.clone());
    let beneficiary_service = BeneficiaryService::new(pool.clone());
    let user_service = UserService::new(pool.clone());

    // Optional automatic draws
    tasks::spawn_all(draw_service.clone(), config.lottery.auto_draw_interval_secs);

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    let bind_addr = (config.server.host.clone(), config.server.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .app_data(web::Data::new(config.clone()))
            .app_data(web::Data::new(broadcaster.clone()))
            .app_data(web::Data::new(bet_service.clone()))
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(beneficiary_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::bet_config)
                    .configure(handlers::draw_config)
                    .configure(handlers::beneficiary_config)
                    .configure(handlers::bettor_config)
                    .configure(handlers::stream_config),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
