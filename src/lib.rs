pub mod bookmarks;
pub mod commands;
pub mod database;
pub mod errors;
pub mod favorites;
pub mod files;
pub mod history;
pub mod logger;
pub mod media;
pub mod player;
pub mod profiles;
pub mod settings;
pub mod shortcuts;
pub mod subtitles;
pub mod tags;
pub mod thumbnails;
pub mod transcode_queue;

use tauri::Manager;

use bookmarks::BookmarksManager;
use database::DatabaseManager;
use favorites::FavoritesManager;
use history::HistoryManager;
use logger::Logger;
use media::MediaTools;
use player::Player;
use profiles::ProfilesManager;
use settings::SettingsManager;
use shortcuts::ShortcutsManager;
use subtitles::SubtitleManager;
use tags::TagsManager;
use thumbnails::ThumbnailStore;
use transcode_queue::TranscodeQueue;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            let handle = app.handle().clone();

            // Logger first so everything below can report through it. Failing
            // to stand up the privileged side is the one fatal error.
            let log_dir = handle.path().app_log_dir()?;
            let logger = Logger::new(&log_dir)?;

            let config_dir = handle.path().app_config_dir()?;
            let settings = SettingsManager::load(config_dir.join("settings.json"));
            let current = settings.get();
            logger.configure(
                current.enable_logging,
                &current.log_level,
                current.log_timestamps,
            );
            logger.info("Settings loaded");

            let pool = tauri::async_runtime::block_on(DatabaseManager::new(&handle))?.pool;

            let screenshot_dir = dirs::picture_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("Pulse");

            app.manage(logger);
            app.manage(settings);
            app.manage(FavoritesManager::new(pool.clone()));
            app.manage(HistoryManager::new(pool.clone()));
            app.manage(BookmarksManager::new(pool.clone()));
            app.manage(TagsManager::new(pool.clone()));
            app.manage(ProfilesManager::new(pool.clone()));
            app.manage(ShortcutsManager::new(pool.clone()));
            app.manage(ThumbnailStore::new(pool));
            app.manage(MediaTools::new(screenshot_dir));
            app.manage(Player::new(current.default_volume));
            app.manage(SubtitleManager::new());
            app.manage(TranscodeQueue::new());

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::minimize_window,
            commands::toggle_maximize_window,
            commands::close_window,
            commands::get_maximize_state,
            commands::get_app_version,
            commands::log_message,
            commands::get_log_file_path,
            commands::list_directory,
            commands::pick_directory,
            commands::get_file_metadata,
            commands::media::generate_thumbnail,
            commands::media::get_cached_thumbnail,
            commands::media::capture_screenshot,
            commands::media::start_transcode,
            commands::media::get_audio_tracks,
            commands::player::add_playlist_item,
            commands::player::remove_playlist_item,
            commands::player::clear_playlist,
            commands::player::select_playlist_item,
            commands::player::next_track,
            commands::player::previous_track,
            commands::player::playback_started,
            commands::player::playback_paused,
            commands::player::stop_playback,
            commands::player::media_loaded,
            commands::player::media_ended,
            commands::player::seek_to,
            commands::player::set_volume,
            commands::player::toggle_mute,
            commands::player::cycle_speed,
            commands::player::set_loop_mode,
            commands::player::toggle_shuffle,
            commands::player::get_playback_state,
            commands::settings::get_settings,
            commands::settings::get_setting,
            commands::settings::set_setting,
            commands::settings::reset_settings,
            commands::subtitles::parse_subtitle_file,
            commands::subtitles::load_subtitles,
            commands::subtitles::set_subtitle_offset,
            commands::subtitles::get_active_subtitle,
            commands::subtitles::set_subtitle_timing,
            commands::subtitles::export_subtitles,
            commands::favorites::add_favorite,
            commands::favorites::remove_favorite,
            commands::favorites::is_favorite,
            commands::favorites::get_favorites,
            commands::history::record_playback,
            commands::history::get_history,
            commands::history::get_history_entry,
            commands::history::clear_history,
            commands::bookmarks::add_bookmark,
            commands::bookmarks::get_bookmarks,
            commands::bookmarks::delete_bookmark,
            commands::tags::create_tag,
            commands::tags::get_tags,
            commands::tags::delete_tag,
            commands::tags::assign_tag,
            commands::tags::unassign_tag,
            commands::tags::get_files_for_tag,
            commands::tags::get_tags_for_file,
            commands::profiles::save_playback_profile,
            commands::profiles::get_playback_profile,
            commands::profiles::get_playback_profiles,
            commands::profiles::delete_playback_profile,
            commands::shortcuts::save_shortcut,
            commands::shortcuts::get_shortcut,
            commands::shortcuts::get_shortcuts,
            commands::transcode::queue_transcode,
            commands::transcode::get_transcode_queue
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
