//! App Router

use salvo::Router;

use crate::{auth, clients, identities, session, trackings};

/// Every route that requires an authenticated identity.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("session").get(session::handler))
        .push(
            Router::with_path("trackings")
                .get(trackings::index::handler)
                .post(trackings::create::handler)
                .push(Router::with_path("summary").get(trackings::summary::handler))
                .push(
                    Router::with_path("{uuid}")
                        .get(trackings::get::handler)
                        .put(trackings::update::handler)
                        .delete(trackings::delete::handler),
                ),
        )
        .push(
            Router::with_path("clients")
                .get(clients::index::handler)
                .post(clients::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(clients::get::handler)
                        .put(clients::update::handler)
                        .delete(clients::delete::handler),
                ),
        )
        .push(
            Router::with_path("identities")
                .get(identities::index::handler)
                .post(identities::create::handler)
                .push(
                    Router::with_path("{login}")
                        .put(identities::update::handler)
                        .delete(identities::delete::handler)
                        .push(Router::with_path("status").put(identities::status::handler)),
                ),
        )
}
