/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

// These talk to the real API and need a token in the environment (or .env)
#[cfg(test)]
mod test {
    use crate::helpers;
    use dotenvy::dotenv;
    use futures::{StreamExt, pin_mut};
    use instagram::v1::{Client, Media, User};

    #[ignore]
    #[tokio::test]
    async fn authenticated_user_info() {
        dotenv().ok();
        let creds = helpers::get_live_auth_tokens().unwrap();
        let client = Client::new(creds);
        let user_info = User::authenticated(&client).await.unwrap();
        println!("User info: {:?}", user_info);
    }

    #[ignore]
    #[tokio::test]
    async fn user_feed_first_pages() {
        dotenv().ok();
        let creds = helpers::get_live_auth_tokens().unwrap();
        let client = Client::new(creds);
        let feed = Media::user_feed(client.clone(), Some(5), Some(2));

        let mut media_count = 0;
        pin_mut!(feed);
        while let Some(page) = feed.next().await {
            media_count += page.unwrap().len();
        }
        println!("Media in feed: {}", media_count);
    }
}
