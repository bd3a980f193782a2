use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;

use crate::{
    auth::{AuthGuard, Claims},
    errors::AppError,
    middleware::get_request_id,
};

/// Route middleware that lets a request through only when its bearer token
/// grants `permission`. The verified claims are stored in the request
/// extensions for [`AuthenticatedUser`].
///
/// ```ignore
/// web::get().to(list_questions).wrap(RequirePermission::new(permissions::GET_QUESTIONS))
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RequirePermission {
    permission: &'static str,
}

impl RequirePermission {
    pub fn new(permission: &'static str) -> Self {
        Self { permission }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionService {
            service: Rc::new(service),
            permission: self.permission,
        }))
    }
}

pub struct RequirePermissionService<S> {
    service: Rc<S>,
    permission: &'static str,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let permission = self.permission;

        Box::pin(async move {
            let Some(guard) = req.app_data::<web::Data<AuthGuard>>().cloned() else {
                let err = AppError::InternalError("Auth guard not configured".to_string());
                return Ok(req.error_response(err).map_into_right_body());
            };

            // A header that is not valid UTF-8 is treated like a malformed one.
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .map(|h| h.to_str().unwrap_or_default().to_string());

            match guard.authorize(header.as_deref(), permission).await {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    log::debug!(
                        "Denied {} {} [{}]: {}",
                        req.method(),
                        req.path(),
                        get_request_id(req.request()).unwrap_or_default(),
                        err
                    );
                    Ok(req.error_response(err).map_into_right_body())
                }
            }
        })
    }
}

/// Extractor handing the verified token claims to a guarded handler.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::InternalError("Route is not guarded by a permission".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}
