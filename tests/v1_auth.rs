/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers;
    use instagram::v1::{AuthState, Creds, InstagramError, Method, Scope, User};
    use std::collections::HashMap;

    fn form(body: &[u8]) -> HashMap<String, String> {
        url::form_urlencoded::parse(body).into_owned().collect()
    }

    #[test]
    fn authorize_login_url() {
        let (api, calls) = helpers::fixture_client(helpers::unauthenticated_creds());
        let state = AuthState::generate();
        let url = api
            .authorize_url(&[Scope::Basic, Scope::Likes, Scope::PublicContent], Some(&state))
            .unwrap();

        assert_eq!(url.host_str(), Some("api.instagram.com"));
        assert_eq!(url.path(), "/oauth/authorize/");
        let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs.get("client_id").map(String::as_str), Some(helpers::CLIENT_ID));
        assert_eq!(pairs.get("redirect_uri").map(String::as_str), Some(helpers::REDIRECT_URI));
        assert_eq!(pairs.get("response_type").map(String::as_str), Some("code"));
        assert_eq!(pairs.get("scope").map(String::as_str), Some("basic likes public_content"));
        assert!(state.matches(&pairs["state"]));
        // Building the url is local
        assert_eq!(calls.count(), 0);
    }

    #[test]
    fn authorize_url_needs_redirect_uri() {
        let (api, _) = helpers::fixture_client(helpers::client_only_creds());
        let err = api.authorize_url(&[Scope::Basic], None).unwrap_err();
        assert!(matches!(err, InstagramError::Auth(_)));
    }

    #[test]
    fn states_are_random() {
        let a = AuthState::generate();
        let b = AuthState::generate();
        assert_ne!(a, b);
        assert!(!a.as_str().is_empty());
        assert!(!a.matches(b.as_str()));
    }

    #[tokio::test]
    async fn exchange_code_for_access_token() {
        let (api, calls) = helpers::fixture_client(helpers::unauthenticated_creds());
        assert!(api.creds().access_token().is_none());

        let token = api.exchange_code_for_token("a-code").await.unwrap();
        assert_eq!(token.access_token, "fb2e77d.47a0479900504cb3ab4a1f626d174d2d");
        assert_eq!(token.user.unwrap().username, "mikeyk");

        let sent = calls.last();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url.as_str(), "https://api.instagram.com/oauth/access_token");
        let body = form(sent.body.as_deref().unwrap());
        assert_eq!(body["grant_type"], "authorization_code");
        assert_eq!(body["code"], "a-code");
        assert_eq!(body["client_id"], helpers::CLIENT_ID);
        assert_eq!(body["client_secret"], helpers::CLIENT_SECRET);
        assert_eq!(body["redirect_uri"], helpers::REDIRECT_URI);

        // The client now acts as the user
        assert_eq!(
            api.creds().access_token(),
            Some("fb2e77d.47a0479900504cb3ab4a1f626d174d2d")
        );
        User::authenticated(&api).await.unwrap();
        assert_eq!(
            calls.last().query_param("access_token").as_deref(),
            Some("fb2e77d.47a0479900504cb3ab4a1f626d174d2d")
        );
    }

    #[tokio::test]
    async fn failed_exchange_keeps_client_unauthenticated() {
        let (api, calls) = helpers::fixture_client(helpers::unauthenticated_creds());
        let err = api
            .exchange_credentials_for_token("mikeyk", "hunter2")
            .await
            .unwrap_err();

        let api_err = err.api_error().unwrap();
        assert_eq!(api_err.code, 400);
        assert_eq!(api_err.error_type, "OAuthException");
        assert_eq!(api_err.error_message, "You are not authorized to use xAuth.");
        assert!(err.is_authorization());
        assert!(api.creds().access_token().is_none());

        let body = form(calls.last().body.as_deref().unwrap());
        assert_eq!(body["grant_type"], "password");
        assert_eq!(body["username"], "mikeyk");
        assert_eq!(body["password"], "hunter2");
    }

    #[tokio::test]
    async fn exchange_needs_client_secret() {
        let (api, calls) = helpers::fixture_client(
            Creds::from_client_id(helpers::CLIENT_ID).with_redirect_uri(helpers::REDIRECT_URI),
        );
        let err = api.exchange_code_for_token("a-code").await.unwrap_err();
        assert!(matches!(err, InstagramError::Auth(_)));
        assert_eq!(calls.count(), 0);
    }

    #[test]
    fn access_token_is_set_once() {
        let (api, _) = helpers::fixture_client(helpers::unauthenticated_creds());
        api.set_access_token("first").unwrap();
        assert!(matches!(
            api.set_access_token("second"),
            Err(InstagramError::AccessTokenAlreadySet())
        ));
        assert_eq!(api.creds().access_token(), Some("first"));
    }

    #[tokio::test]
    async fn token_added_to_client_only_creds() {
        let creds = helpers::client_only_creds().with_access_token("user-token");
        let (api, calls) = helpers::fixture_client(creds);
        User::authenticated(&api).await.unwrap();
        assert_eq!(
            calls.last().query_param("access_token").as_deref(),
            Some("user-token")
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let printed = format!("{:?}", helpers::authenticated_creds().with_client_secret("s3cr3t"));
        assert!(!printed.contains("s3cr3t"));
        assert!(printed.contains(helpers::CLIENT_ID));
    }

    #[tokio::test]
    async fn exchange_refused_when_token_already_held() {
        let (api, calls) = helpers::fixture_client(helpers::authenticated_creds());
        let err = api.exchange_code_for_token("a-code").await.unwrap_err();
        assert!(matches!(err, InstagramError::AccessTokenAlreadySet()));
        assert_eq!(api.creds().access_token(), Some(helpers::ACCESS_TOKEN));
        assert_eq!(calls.count(), 0);
    }
}
