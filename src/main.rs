fn main() -> Result<(), String> {
    easter_words_lib::run()
}
