use salvo::Depot;
use salvo::http::Method;
use salvo::http::header::AUTHORIZATION;

use crate::app::api::envelope::render_error;
use crate::error::AppError;
use vestibule_service::auth::depot::set_principal_in_depot;
use vestibule_service::auth::get_validator_from_depot;
use vestibule_service::auth::token::parse_bearer;
use vestibule_service::error::ServiceError;

/// Read-only methods pass the gate unauthenticated. Listing and viewing
/// entries is public; only writes are gated.
fn is_read_only(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// ## Summary
/// Bearer-token gate for write requests.
///
/// ## Side Effects
/// Inserts the authenticated `StaffPrincipal` into the depot for downstream
/// handlers.
///
/// ## Errors
/// Responds 401 when the `Authorization` header is missing, uses another
/// scheme, carries an empty token or the token is rejected, and 500 when the
/// validator itself fails. The handler does not run in either case.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        if is_read_only(req.method()) {
            return;
        }

        let Some(token) = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_bearer)
        else {
            tracing::debug!("Missing or malformed bearer credentials");
            render_error(res, &AppError::from(ServiceError::NotAuthenticated));
            ctrl.skip_rest();
            return;
        };

        let validator = match get_validator_from_depot(depot) {
            Ok(validator) => validator,
            Err(e) => {
                render_error(res, &AppError::from(e));
                ctrl.skip_rest();
                return;
            }
        };

        match validator.validate(token).await {
            Ok(Some(principal)) => {
                tracing::debug!(username = %principal.username, "Request authenticated");
                set_principal_in_depot(depot, principal);
            }
            Ok(None) => {
                tracing::debug!("Bearer token rejected");
                render_error(res, &AppError::from(ServiceError::NotAuthenticated));
                ctrl.skip_rest();
            }
            Err(e) => {
                render_error(res, &AppError::from(e));
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Middleware handler for bearer authentication.
/// Hoop it onto routers whose write methods must be gated.
pub struct AuthMiddleware;
