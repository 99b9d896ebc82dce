pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod golf_store;
    }
}

pub mod modules {
    pub mod golf {
        pub mod core {
            pub mod model;
            pub mod scoring;
            pub mod state;
        }
        pub mod use_cases {
            pub mod register_player {
                pub mod handler;
            }
            pub mod organize_season {
                pub mod decide;
                pub mod handler;
            }
            pub mod play_game {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
            }
            pub mod season_stats {
                pub mod aggregation;
                pub mod export;
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod graphql;
                pub mod http;
            }
        }
        pub mod errors;
        pub mod repository;
    }
}

pub mod shell;
