use biblioteca::config::{AppConfig, AuthorsSection, BooksSection, ServerConfig, ServiceKind};

#[test]
fn default_config_is_valid_books_service() {
    let config = AppConfig::default();

    assert_eq!(config.service, ServiceKind::Books);
    assert!(config.authors.seed_defaults);
    assert_eq!(config.books.author_service_url, "http://autores-service:8001");
    assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    config.validate().expect("defaults should be valid");
}

#[test]
fn authors_service_defaults_to_port_8001() {
    let config = AppConfig {
        service: ServiceKind::Authors,
        ..Default::default()
    };
    assert_eq!(config.bind_addr(), "0.0.0.0:8001");

    let config = AppConfig {
        service: ServiceKind::Authors,
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: Some(9100),
        },
        ..Default::default()
    };
    assert_eq!(config.bind_addr(), "127.0.0.1:9100");
}

#[test]
fn books_service_requires_http_author_url() {
    for url in ["", "   ", "autores-service:8001", "ftp://autores"] {
        let config = AppConfig {
            books: BooksSection {
                author_service_url: url.into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(
            config.validate().is_err(),
            "Expected author service url {:?} to fail validation",
            url
        );
    }
}

#[test]
fn books_service_rejects_zero_limits() {
    let zero_timeout = AppConfig {
        books: BooksSection {
            request_timeout_ms: 0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(zero_timeout.validate().is_err());

    let zero_concurrency = AppConfig {
        books: BooksSection {
            resolve_concurrency: 0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(zero_concurrency.validate().is_err());
}

#[test]
fn authors_service_ignores_book_settings() {
    let config = AppConfig {
        service: ServiceKind::Authors,
        authors: AuthorsSection {
            seed_defaults: false,
        },
        books: BooksSection {
            author_service_url: String::new(),
            ..Default::default()
        },
        ..Default::default()
    };
    config.validate().expect("author service has no upstream");
}

#[test]
fn service_kind_parses_both_languages() {
    assert_eq!("authors".parse::<ServiceKind>().unwrap(), ServiceKind::Authors);
    assert_eq!("Autores".parse::<ServiceKind>().unwrap(), ServiceKind::Authors);
    assert_eq!("libros".parse::<ServiceKind>().unwrap(), ServiceKind::Books);
    assert!("magazines".parse::<ServiceKind>().is_err());
}
