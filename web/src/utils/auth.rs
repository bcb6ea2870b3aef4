use leptos::prelude::*;
use serde::{Deserialize, Serialize};

const TOKEN_KEY: &str = "havenmap_auth_token";

#[derive(Debug, Serialize, Deserialize, Clone)]
struct Claims {
    sub: String, // account email
    exp: usize,
    user_id: i64,
    role: String, // "user", "owner" or "admin"
}

/// The signed-in session, decoded from the stored token. Created once at
/// app start, handed to the screens that need it, and torn down at
/// sign-out; nothing reads the token ambiently.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user_id: i64,
    pub email: String,
    pub role: String,
    pub token: String,
}

impl AuthSession {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn is_owner(&self) -> bool {
        self.role == "owner" || self.role == "admin"
    }
}

/// Reads and decodes the stored token. Returns None when missing or
/// malformed; expiry is enforced server-side on every authorized call.
pub fn load_session() -> Option<AuthSession> {
    let token = get_stored_token()?;
    let claims = decode_claims(&token)?;
    Some(AuthSession {
        user_id: claims.user_id,
        email: claims.sub,
        role: claims.role,
        token,
    })
}

pub fn store_token(token: &str) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::prelude::*;

        #[wasm_bindgen]
        extern "C" {
            #[wasm_bindgen(js_namespace = localStorage)]
            fn setItem(key: &str, value: &str);
        }

        setItem(TOKEN_KEY, token);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
    }
}

pub fn clear_session() {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::prelude::*;

        #[wasm_bindgen]
        extern "C" {
            #[wasm_bindgen(js_namespace = localStorage)]
            fn removeItem(key: &str);
        }

        removeItem(TOKEN_KEY);
    }
}

/// Reactive wrapper around `load_session` for screens that render before
/// hydration has access to localStorage.
pub fn use_session() -> RwSignal<Option<AuthSession>> {
    let session = RwSignal::new(None::<AuthSession>);
    Effect::new(move |_| {
        session.set(load_session());
    });
    session
}

fn get_stored_token() -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::prelude::*;

        #[wasm_bindgen]
        extern "C" {
            #[wasm_bindgen(js_namespace = localStorage)]
            fn getItem(key: &str) -> Option<String>;
        }

        getItem(TOKEN_KEY).filter(|t| !t.is_empty())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        // The server never reads localStorage; authorized server functions
        // take the token explicitly.
        None
    }
}

fn decode_claims(token: &str) -> Option<Claims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload = parts[1];
    let padded = match payload.len() % 4 {
        2 => format!("{}==", payload),
        3 => format!("{}=", payload),
        _ => payload.to_string(),
    };

    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::prelude::*;

        #[wasm_bindgen]
        extern "C" {
            #[wasm_bindgen(js_name = atob)]
            fn base64_decode(data: &str) -> String;
        }

        if let Ok(decoded) = std::panic::catch_unwind(|| base64_decode(&padded)) {
            if let Ok(claims) = serde_json::from_str::<Claims>(&decoded) {
                return Some(claims);
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = padded;
    }

    None
}
