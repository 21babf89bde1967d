use std::sync::mpsc::Sender;
use std::thread;

use log::error;

use crate::api::ApiClient;
use crate::models::{CreatePostInput, UpdatePostInput};

use super::messages::AppMessage;

pub fn load_posts(client: ApiClient, tx: Sender<AppMessage>) {
    thread::spawn(move || {
        let result = client.list_posts();
        if tx.send(AppMessage::PostsLoaded(result)).is_err() {
            error!("failed to send PostsLoaded message");
        }
    });
}

pub fn load_post(client: ApiClient, tx: Sender<AppMessage>, post_id: String) {
    thread::spawn(move || {
        let result = client.get_post(&post_id);
        if tx.send(AppMessage::PostLoaded { post_id, result }).is_err() {
            error!("failed to send PostLoaded message");
        }
    });
}

pub fn create_post(client: ApiClient, tx: Sender<AppMessage>, payload: CreatePostInput) {
    thread::spawn(move || {
        let result = client.create_post(&payload);
        if tx.send(AppMessage::PostCreated(result)).is_err() {
            error!("failed to send PostCreated message");
        }
    });
}

pub fn create_reply(
    client: ApiClient,
    tx: Sender<AppMessage>,
    parent_id: String,
    payload: CreatePostInput,
) {
    thread::spawn(move || {
        let result = client.create_post(&payload);
        if tx
            .send(AppMessage::ReplyCreated { parent_id, result })
            .is_err()
        {
            error!("failed to send ReplyCreated message");
        }
    });
}

pub fn update_post(
    client: ApiClient,
    tx: Sender<AppMessage>,
    post_id: String,
    payload: UpdatePostInput,
) {
    thread::spawn(move || {
        let result = client.update_post(&post_id, &payload);
        if tx.send(AppMessage::PostUpdated { post_id, result }).is_err() {
            error!("failed to send PostUpdated message");
        }
    });
}

pub fn delete_post(client: ApiClient, tx: Sender<AppMessage>, post_id: String) {
    thread::spawn(move || {
        let result = client.delete_post(&post_id);
        if tx.send(AppMessage::PostDeleted { post_id, result }).is_err() {
            error!("failed to send PostDeleted message");
        }
    });
}
