use actix_web::{App, HttpServer, web};
use pushkind_notes::client::{
    CategoryDraft, ClientConfig, HttpNotesClient, NoteBoard, NoteDraft, NotesApi,
};
use pushkind_notes::repository::DieselRepository;
use pushkind_notes::routes;
use tera::Tera;

mod common;

/// Starts the notes server on an ephemeral port and returns a client for it.
fn spawn_server(test_db: &common::TestDb) -> (HttpNotesClient, actix_web::dev::ServerHandle) {
    let repo = DieselRepository::new(test_db.pool());
    let tera = Tera::new("templates/**/*").expect("templates should parse");

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(tera.clone()))
            .configure(routes::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("should bind ephemeral port");
    let addr = server.addrs()[0];

    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    let client = HttpNotesClient::new(&ClientConfig::new(format!("http://{addr}/api")));
    (client, handle)
}

#[actix_web::test]
async fn client_round_trips_against_running_server() {
    let test_db = common::TestDb::new();
    let (client, handle) = spawn_server(&test_db);

    let category = client
        .create_category(&CategoryDraft {
            name: "Work".into(),
            color: "red".into(),
        })
        .await
        .expect("should create category");
    let note = client
        .create_note(&NoteDraft {
            title: "Report".into(),
            content: "due friday".into(),
            is_archived: None,
        })
        .await
        .expect("should create note");
    assert!(!note.is_archived);

    client
        .add_category_to_note(note.id, category.id)
        .await
        .expect("should attach category");

    let detail = client.get_note(note.id).await.expect("should fetch note");
    assert_eq!(detail.note.title, "Report");
    assert_eq!(detail.categories, vec![category.clone()]);

    let toggled = client
        .toggle_archive(note.id)
        .await
        .expect("should toggle archive");
    assert!(toggled.is_archived);
    let archived = client.list_notes(false).await.expect("should list archived");
    assert_eq!(archived.len(), 1);

    client
        .delete_category(category.id)
        .await
        .expect("should delete category");
    let detail = client.get_note(note.id).await.expect("should fetch note");
    assert!(detail.categories.is_empty());

    let err = client.get_note(9999).await.unwrap_err();
    assert_eq!(err.message(), "Failed to fetch note.");

    handle.stop(true).await;
}

#[actix_web::test]
async fn error_responses_map_to_client_errors() {
    let test_db = common::TestDb::new();
    let (client, handle) = spawn_server(&test_db);

    let err = client.delete_note(42).await.unwrap_err();
    assert_eq!(err.message(), "Failed to delete note.");

    let err = client
        .create_category(&CategoryDraft {
            name: "   ".into(),
            color: "red".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.message(), "Failed to create category.");

    let err = client.add_category_to_note(1, 1).await.unwrap_err();
    assert_eq!(err.message(), "Failed to add category to note.");

    handle.stop(true).await;
}

#[actix_web::test]
async fn board_loads_from_running_server() {
    let test_db = common::TestDb::new();
    let (client, handle) = spawn_server(&test_db);

    let category = client
        .create_category(&CategoryDraft {
            name: "Home".into(),
            color: "green".into(),
        })
        .await
        .unwrap();
    let note = client
        .create_note(&NoteDraft {
            title: "Groceries".into(),
            content: String::new(),
            is_archived: None,
        })
        .await
        .unwrap();
    client
        .add_category_to_note(note.id, category.id)
        .await
        .unwrap();

    let mut board = NoteBoard::new(client);
    board.load().await.expect("should load board");
    let visible = board.visible_notes(false, Some(category.id));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].note.id, note.id);

    board.delete_note(note.id).await.expect("should delete note");
    assert!(board.api().list_notes(true).await.unwrap().is_empty());

    handle.stop(true).await;
}
