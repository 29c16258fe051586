use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::domain::Player;
use crate::engine::session::GameSession;
use crate::stats::Statistics;

/// Ключи хранилища.
pub const KEY_PLAYERS: &str = "loto_players";
pub const KEY_GAMES: &str = "loto_games";
pub const KEY_STATISTICS: &str = "loto_statistics";

/// Ошибки хранилища. Наружу движка они не выходят: чтение деградирует
/// до пустых данных, ошибка записи логируется и глотается.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] io::Error),

    #[error("Повреждённые данные: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Абстракция key-value хранилища: строковый ключ → JSON-значение.
/// Минимальная поверхность, которую требует движок, плюс ключ статистики.
pub trait LotoStorage {
    fn load_players(&self) -> Result<Vec<Player>, StorageError>;
    fn save_players(&mut self, players: &[Player]) -> Result<(), StorageError>;

    fn load_games(&self) -> Result<Vec<GameSession>, StorageError>;
    fn save_games(&mut self, games: &[GameSession]) -> Result<(), StorageError>;

    fn load_statistics(&self) -> Result<Option<Statistics>, StorageError>;
    fn save_statistics(&mut self, statistics: &Statistics) -> Result<(), StorageError>;

    fn clear_all(&mut self) -> Result<(), StorageError>;
}

/// Простое in-memory хранилище: ключ → JSON-строка.
/// Для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    values: HashMap<String, String>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Подложить сырое значение под ключ (для тестов деградации).
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    /// Сырое значение по ключу.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        match self.values.get(key) {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_value<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.values.insert(key.to_string(), json);
        Ok(())
    }
}

impl LotoStorage for InMemoryStorage {
    fn load_players(&self) -> Result<Vec<Player>, StorageError> {
        self.load_list(KEY_PLAYERS)
    }

    fn save_players(&mut self, players: &[Player]) -> Result<(), StorageError> {
        self.save_value(KEY_PLAYERS, players)
    }

    fn load_games(&self) -> Result<Vec<GameSession>, StorageError> {
        self.load_list(KEY_GAMES)
    }

    fn save_games(&mut self, games: &[GameSession]) -> Result<(), StorageError> {
        self.save_value(KEY_GAMES, games)
    }

    fn load_statistics(&self) -> Result<Option<Statistics>, StorageError> {
        match self.values.get(KEY_STATISTICS) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    fn save_statistics(&mut self, statistics: &Statistics) -> Result<(), StorageError> {
        self.save_value(KEY_STATISTICS, statistics)
    }

    fn clear_all(&mut self) -> Result<(), StorageError> {
        self.values.clear();
        Ok(())
    }
}

/// Хранилище в каталоге: по одному JSON-файлу на ключ.
#[derive(Debug)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn load_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save_value<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    fn remove_key(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl LotoStorage for JsonFileStorage {
    fn load_players(&self) -> Result<Vec<Player>, StorageError> {
        self.load_list(KEY_PLAYERS)
    }

    fn save_players(&mut self, players: &[Player]) -> Result<(), StorageError> {
        self.save_value(KEY_PLAYERS, players)
    }

    fn load_games(&self) -> Result<Vec<GameSession>, StorageError> {
        self.load_list(KEY_GAMES)
    }

    fn save_games(&mut self, games: &[GameSession]) -> Result<(), StorageError> {
        self.save_value(KEY_GAMES, games)
    }

    fn load_statistics(&self) -> Result<Option<Statistics>, StorageError> {
        match fs::read_to_string(self.path(KEY_STATISTICS)) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save_statistics(&mut self, statistics: &Statistics) -> Result<(), StorageError> {
        self.save_value(KEY_STATISTICS, statistics)
    }

    fn clear_all(&mut self) -> Result<(), StorageError> {
        self.remove_key(KEY_PLAYERS)?;
        self.remove_key(KEY_GAMES)?;
        self.remove_key(KEY_STATISTICS)?;
        Ok(())
    }
}
