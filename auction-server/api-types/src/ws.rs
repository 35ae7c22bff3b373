use {
    crate::{
        round::RoundResult,
        Routable,
        RoundNumber,
    },
    http::Method,
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::ToSchema,
};

/// This enum is used to push game updates to every connected client.
#[derive(Serialize, Clone, ToSchema, Deserialize, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum ServerUpdateResponse {
    #[serde(rename = "round_resolved")]
    RoundResolved { result: RoundResult },
    #[serde(rename = "game_reset")]
    GameReset {
        #[schema(example = 1)]
        round: RoundNumber,
    },
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "ws")]
    Ws,
}

impl Routable for Route {
    fn properties(&self) -> crate::RouteProperties {
        let full_path = format!("{}{}", crate::Route::V1.as_ref(), self.as_ref())
            .trim_end_matches('/')
            .to_string();
        match self {
            Route::Ws => crate::RouteProperties {
                access_level: crate::AccessLevel::Public,
                method: Method::GET,
                full_path,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::round::RoundOutcome,
        time::macros::datetime,
    };

    #[test]
    fn test_round_resolved_update_is_tagged() {
        let update = ServerUpdateResponse::RoundResolved {
            result: RoundResult {
                round:           3,
                outcome:         RoundOutcome::Won {
                    team:   "team2".to_string(),
                    module: "edge_detection".to_string(),
                    amount: 35,
                },
                resolution_time: datetime!(2024-05-23 21:26:57 UTC),
            },
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["type"], "round_resolved");
        assert_eq!(json["result"]["outcome"]["type"], "won");
        assert_eq!(json["result"]["outcome"]["team"], "team2");
        assert_eq!(json["result"]["resolution_time"], "2024-05-23T21:26:57Z");

        let decoded: ServerUpdateResponse = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, update);
    }

    #[test]
    fn test_game_reset_update_shape() {
        let json = serde_json::to_string(&ServerUpdateResponse::GameReset { round: 1 }).unwrap();
        assert_eq!(json, r#"{"type":"game_reset","round":1}"#);
    }
}
