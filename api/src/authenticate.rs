use entity::user;
use rocket::http::CookieJar;
use rocket::outcome::{try_outcome, Outcome};
use rocket::serde::json::Json;
use rocket::{
    get, post,
    request::{self, FromRequest},
    Request, State,
};
use rocket_okapi::{openapi, request::OpenApiFromRequest};
use sea_orm::DatabaseConnection;

use service::dto::{CurrentUser, LoginInput, RegisterUser};
use service::error::{AuthError, GenericError, MyRocketError};

use crate::config::AppConfig;

const AUTH_COOKIE: &str = "auth";

/// Message of the guard that rejected the request, picked up by the JSON catcher.
#[derive(Debug, Default)]
pub(crate) struct GuardFailure(pub Option<String>);

fn reject<S>(request: &Request<'_>, error: GenericError) -> request::Outcome<S, GenericError> {
    let message = error.to_err_message();
    request.local_cache(|| GuardFailure(Some(message)));
    Outcome::Error((error.to_rocket_status(), error))
}

/// A request carrying a valid session cookie.
#[derive(OpenApiFromRequest, Debug)]
pub struct AuthenticatedUser {
    cookie: String,
    pub user: user::Model,
}

/// A logged in user with admin rights, either stored on the account or granted through
/// `ADMIN_EMAILS`.
#[derive(OpenApiFromRequest, Debug)]
pub struct AdminUser(pub user::Model);

impl AuthenticatedUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }

    fn remove_from_jar(cookies: &CookieJar<'_>) {
        cookies.remove_private(AUTH_COOKIE);
    }

    pub async fn remove_cookie(
        self,
        db: &DatabaseConnection,
        cookies: &CookieJar<'_>,
    ) -> Result<(), GenericError> {
        service::remove_cookie(db, &self.cookie).await?;
        Self::remove_from_jar(cookies);
        Ok(())
    }

    pub async fn remove_all_cookies(
        self,
        db: &DatabaseConnection,
        cookies: &CookieJar<'_>,
    ) -> Result<(), GenericError> {
        let removed = service::remove_all_cookies(db, self.user.id).await?;
        log::info!("Ended {removed} sessions of user {}", self.user.id);
        Self::remove_from_jar(cookies);
        Ok(())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = GenericError;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let Some(db) = request.rocket().state::<DatabaseConnection>() else {
            return reject(request, GenericError::UnknownError("Database not found"));
        };
        let Some(cookie) = request.cookies().get_private(AUTH_COOKIE) else {
            return reject(request, AuthError::Missing.into());
        };

        match service::user_from_cookie(db, cookie.value()).await {
            Ok(Some(user)) => Outcome::Success(Self {
                cookie: cookie.value().to_string(),
                user,
            }),
            Ok(None) => reject(request, AuthError::Invalid.into()),
            Err(e) => reject(request, e),
        }
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminUser {
    type Error = GenericError;

    async fn from_request(request: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        let authenticated = try_outcome!(request.guard::<AuthenticatedUser>().await);
        let granted = request
            .rocket()
            .state::<AppConfig>()
            .is_some_and(|config| config.is_admin_email(&authenticated.user.email));

        if authenticated.user.admin || granted {
            Outcome::Success(AdminUser(authenticated.user))
        } else {
            reject(request, AuthError::NotAdmin.into())
        }
    }
}

/// # Register
///
/// Creates an account and logs it in. Passwords need at least eight characters.
#[openapi(tag = "User")]
#[post("/register", format = "json", data = "<user>")]
pub(crate) async fn register(
    user: Json<RegisterUser>,
    db: &State<DatabaseConnection>,
    config: &State<AppConfig>,
    cookies: &CookieJar<'_>,
) -> Result<Json<CurrentUser>, GenericError> {
    let user =
        service::register_user(db.inner(), user.into_inner(), &config.admin_emails, cookies)
            .await?;
    Ok(Json(user.into()))
}

/// # Login
///
/// # Parameters
///
/// - `email` - The email of the user
///
/// - `password` - The password of the user
///
/// # Returns
///
/// The logged in user, with the session in the `auth` cookie
#[openapi(tag = "User")]
#[post("/login", format = "json", data = "<login_data>")]
pub(crate) async fn login(
    login_data: Json<LoginInput>,
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
) -> Result<Json<CurrentUser>, GenericError> {
    let login_data = login_data.into_inner();
    let user = service::login(db.inner(), &login_data.email, &login_data.password, cookies).await?;
    Ok(Json(user.into()))
}

#[openapi(tag = "User")]
#[post("/logout")]
pub(crate) async fn logout(
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
    user: AuthenticatedUser,
) -> Result<&'static str, GenericError> {
    user.remove_cookie(db.inner(), cookies).await?;
    Ok("Successfully logged out")
}

#[openapi(tag = "User")]
#[post("/logout-all")]
pub(crate) async fn logout_all(
    db: &State<DatabaseConnection>,
    cookies: &CookieJar<'_>,
    user: AuthenticatedUser,
) -> Result<&'static str, GenericError> {
    user.remove_all_cookies(db.inner(), cookies).await?;
    Ok("Successfully logged out")
}

#[openapi(tag = "User")]
#[get("/check-cookie")]
pub(crate) async fn check_cookie(_user: AuthenticatedUser) -> &'static str {
    "Authenticated"
}

/// # Current user
#[openapi(tag = "User")]
#[get("/me")]
pub(crate) async fn me(user: AuthenticatedUser) -> Json<CurrentUser> {
    Json(user.user.into())
}
