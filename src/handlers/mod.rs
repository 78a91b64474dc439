pub mod auth;
pub mod categories;
pub mod notifications;
pub mod payments;
pub mod projects;
pub mod proposals;
pub mod reviews;
pub mod users;
pub mod wallets;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth & user routes ──
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(auth::login))
            .route("/status", web::get().to(auth::status)),
    );
    cfg.service(
        web::scope("/user")
            .route("", web::patch().to(users::update))
            .route("/register", web::post().to(users::register))
            .route("/profile", web::get().to(users::own_profile))
            .route("/profile/{id}", web::get().to(users::profile))
            .route("/block", web::patch().to(users::block))
            .route("/unblock", web::patch().to(users::unblock))
            .route("/soft-delete", web::patch().to(users::soft_delete)),
    );

    // ── Category routes (reads public, writes admin only) ──
    cfg.service(
        web::scope("/category")
            .route("", web::get().to(categories::list))
            .route("", web::post().to(categories::create))
            .route("", web::patch().to(categories::update))
            .route("", web::delete().to(categories::delete))
            .route("/{id}", web::get().to(categories::get)),
    );

    // ── Project routes (static segments before `/{id}`) ──
    cfg.service(
        web::scope("/project")
            .route("", web::get().to(projects::find_all))
            .route("", web::post().to(projects::create))
            .route("/search", web::get().to(projects::search))
            .route("/filter", web::get().to(projects::filter))
            .route("/user/{id}", web::get().to(projects::find_by_user))
            .route("/send-approval/{id}", web::patch().to(projects::send_approval))
            .route("/approve/{id}", web::patch().to(projects::approve))
            .route("/cancel/{id}", web::patch().to(projects::cancel_approval))
            .route("/refund/{id}", web::patch().to(projects::refund))
            .route("/{id}", web::get().to(projects::get))
            .route("/{id}", web::patch().to(projects::update))
            .route("/{id}", web::delete().to(projects::delete)),
    );

    // ── Proposal routes ──
    cfg.service(
        web::scope("/proposal")
            .route("", web::post().to(proposals::submit))
            .route("/freelancer", web::get().to(proposals::list_own))
            .route("/project/{id}", web::get().to(proposals::list_by_project))
            .route("/accept/{id}", web::patch().to(proposals::accept))
            .route("/reject/{id}", web::patch().to(proposals::reject))
            .route("/{id}", web::get().to(proposals::get))
            .route("/{id}", web::patch().to(proposals::update))
            .route("/{id}", web::delete().to(proposals::withdraw)),
    );

    // ── Wallet & payment routes ──
    cfg.service(
        web::scope("/wallet")
            .route("", web::get().to(wallets::get))
            .route("/deposit", web::patch().to(wallets::deposit))
            .route("/withdraw", web::patch().to(wallets::withdraw)),
    );
    cfg.service(
        web::scope("/payment")
            .route("/user", web::get().to(payments::list_own))
            .route("/{id}", web::get().to(payments::get)),
    );

    // ── Review routes ──
    cfg.service(
        web::scope("/review")
            .route("", web::get().to(reviews::list_own))
            .route("", web::post().to(reviews::create))
            .route("/user/{id}", web::get().to(reviews::for_user))
            .route("/project/{id}", web::get().to(reviews::for_project))
            .route("/{id}", web::get().to(reviews::get)),
    );

    // ── Notification routes ──
    cfg.service(
        web::scope("/notification")
            .route("", web::get().to(notifications::list))
            .route("/{id}", web::patch().to(notifications::mark_read))
            .route("/{id}", web::delete().to(notifications::delete)),
    );
}
